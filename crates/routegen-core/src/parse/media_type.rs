use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type object under a `content` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, serde_json::Value>,
}

/// Content map keyed by media type, in declaration order.
pub type Content = IndexMap<String, MediaType>;

/// The first media type entry that carries a schema, in declaration order.
pub fn first_schema(content: &Content) -> Option<(&str, &SchemaOrRef)> {
    content
        .iter()
        .find_map(|(media_type, mt)| mt.schema.as_ref().map(|s| (media_type.as_str(), s)))
}
