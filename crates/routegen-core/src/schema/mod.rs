//! Schema collaborators used by the route builder: `$ref` resolution, type
//! expression rendering and the component registry.

pub mod convert;
pub mod registry;
pub mod resolver;
pub mod type_expr;

use serde::Serialize;

use crate::parse::header::Header;
use crate::parse::parameter::Parameter;
use crate::parse::request_body::RequestBody;
use crate::parse::response::Response;
use crate::parse::schema::SchemaOrRef;

pub use registry::{Component, ComponentRegistry, ParsedSchema};
pub use resolver::DefaultSchemaResolver;

/// Type expression used when nothing better can be determined.
pub const UNKNOWN: &str = "unknown";

/// The `#/components/<section>` a reference points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ComponentCategory {
    Schemas,
    Responses,
    RequestBodies,
    Other(String),
}

impl ComponentCategory {
    pub fn from_section(section: &str) -> Self {
        match section {
            "schemas" => ComponentCategory::Schemas,
            "responses" => ComponentCategory::Responses,
            "requestBodies" => ComponentCategory::RequestBodies,
            other => ComponentCategory::Other(other.to_string()),
        }
    }

    pub fn section(&self) -> &str {
        match self {
            ComponentCategory::Schemas => "schemas",
            ComponentCategory::Responses => "responses",
            ComponentCategory::RequestBodies => "requestBodies",
            ComponentCategory::Other(section) => section,
        }
    }
}

impl From<ComponentCategory> for String {
    fn from(value: ComponentCategory) -> Self {
        value.section().to_string()
    }
}

/// What a resolved reference points at.
#[derive(Debug, Clone, PartialEq)]
pub enum RefTarget {
    Schema(SchemaOrRef),
    Response(Response),
    RequestBody(RequestBody),
    Parameter(Parameter),
    Header(Header),
    /// A section this crate does not model (`examples`, `links`, ...).
    Unknown,
}

/// A dereferenced `$ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRef {
    /// Component key as written in the document.
    pub name: String,
    /// Formatted type name for the component.
    pub type_name: String,
    pub category: ComponentCategory,
    pub target: RefTarget,
}

/// Structural facts about an object-like schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaShape {
    pub is_object: bool,
    pub all_fields_optional: bool,
    pub field_names: Vec<String>,
}

/// Resolves references and renders type expressions for the route builder.
pub trait SchemaResolver {
    /// Dereference `ref_path`. `None` when it cannot be resolved.
    fn resolve_reference(&self, ref_path: &str) -> Option<ResolvedRef>;

    /// Type expression for a schema, without nullable decoration of the root.
    fn inline_type_expression(&self, schema: &SchemaOrRef) -> String;

    /// Type name for a raw component name.
    fn format_identifier(&self, name: &str) -> String;

    fn schema_shape(&self, schema: &SchemaOrRef) -> SchemaShape;

    /// Append `| null` to a type expression that does not already allow null.
    fn decorate_nullable(&self, nullable: bool, type_expr: String) -> String {
        if !nullable || type_expr == "null" || type_expr.ends_with(" | null") {
            return type_expr;
        }
        format!("{type_expr} | null")
    }

    fn format_description(&self, text: &str, single_line: bool) -> String {
        if single_line {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            text.lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        }
    }
}
