use serde::{Deserialize, Serialize};

use super::media_type::Content;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: Content,

    /// Absent means required for route building purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Preferred argument name for the body.
    #[serde(rename = "x-name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}
