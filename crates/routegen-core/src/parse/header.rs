use serde::{Deserialize, Serialize};

use super::schema::{Schema, SchemaOrRef, TypeSet};

/// A response header definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    // Swagger 2.0 headers declare their type inline.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,
}

impl Header {
    /// Schema from the inline `type`/`format`/`items` keywords, if any.
    pub fn keyword_schema(&self) -> Option<Schema> {
        self.schema_type.as_ref()?;
        Some(Schema {
            schema_type: self.schema_type.clone(),
            format: self.format.clone(),
            items: self.items.clone(),
            ..Schema::default()
        })
    }
}

/// A reference or inline header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Header(Header),
}
