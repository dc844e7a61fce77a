use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;
use super::parameter::ParameterOrRef;
use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub version: String,
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Top-level OpenAPI 3.x document. Swagger 2.0 documents deserialize into
/// the same struct and are lifted onto the 3.x fields after parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    /// Empty for Swagger 2.0 input until it is upgraded.
    #[serde(default)]
    pub openapi: String,

    #[serde(default)]
    pub swagger: Option<String>,

    pub info: Info,

    /// Paths in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,

    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,

    // Swagger 2.0 only; drained into `components` by the upgrade.
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub produces: Vec<String>,
}

impl OpenApiSpec {
    /// Whether the document declares a non-empty global security requirement.
    pub fn has_global_security(&self) -> bool {
        self.security.as_ref().is_some_and(|s| !s.is_empty())
    }
}
