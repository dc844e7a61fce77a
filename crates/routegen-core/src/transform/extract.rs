use heck::ToPascalCase;

use crate::ir::{ErrorSchema, RequestBodyInfo, ResponseBodyInfo, RouteParams};
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::schema::{Component, ComponentCategory, ComponentRegistry, RefTarget, SchemaResolver};

use super::params::object_schema;
use super::responses::rebuild_full;

/// Which inline schemas are hoisted into components, and the name suffixes
/// tried for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub request_body: bool,
    pub request_params: bool,
    pub response_body: bool,
    pub response_error: bool,
    pub request_body_suffixes: Vec<String>,
    pub request_params_suffixes: Vec<String>,
    pub response_body_suffixes: Vec<String>,
    pub response_error_suffixes: Vec<String>,
}

fn suffixes(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            request_body: false,
            request_params: false,
            response_body: false,
            response_error: false,
            request_body_suffixes: suffixes(&["Payload", "Body", "Input"]),
            request_params_suffixes: suffixes(&["Params"]),
            response_body_suffixes: suffixes(&["Data", "Result", "Output"]),
            response_error_suffixes: suffixes(&[
                "Error",
                "Fail",
                "Fails",
                "ErrorData",
                "HttpError",
                "BadResponse",
            ]),
        }
    }
}

/// Candidate component names for a route, one per suffix.
pub fn candidates(route_usage: &str, suffixes: &[String]) -> Vec<String> {
    let base = route_usage.to_pascal_case();
    suffixes.iter().map(|s| format!("{base}{s}")).collect()
}

fn hoist(
    registry: &mut ComponentRegistry,
    resolver: &dyn SchemaResolver,
    names: Vec<String>,
    schema: SchemaOrRef,
) -> Component {
    registry.create_component(resolver, ComponentCategory::Schemas, &names, schema)
}

/// Hoist an inline request body schema. No-op for `$ref` schemas.
pub fn extract_request_body(
    registry: &mut ComponentRegistry,
    resolver: &dyn SchemaResolver,
    body: &mut RequestBodyInfo,
    route_usage: &str,
    options: &ExtractOptions,
) {
    let Some(schema @ SchemaOrRef::Schema(_)) = &body.schema else {
        return;
    };
    let component = hoist(
        registry,
        resolver,
        candidates(route_usage, &options.request_body_suffixes),
        schema.clone(),
    );
    body.schema = Some(SchemaOrRef::reference(component.ref_path));
    body.type_expr = Some(component.type_name);
}

/// Hoist the inline schema of the success response and retype its entry.
pub fn extract_response_body(
    registry: &mut ComponentRegistry,
    resolver: &dyn SchemaResolver,
    info: &mut ResponseBodyInfo,
    route_usage: &str,
    options: &ExtractOptions,
) {
    let Some(index) = info.success.index else {
        return;
    };
    let Some(response) = info.responses.get_mut(index) else {
        return;
    };
    let Some(schema @ SchemaOrRef::Schema(_)) = &response.schema else {
        return;
    };
    let component = hoist(
        registry,
        resolver,
        candidates(route_usage, &options.response_body_suffixes),
        schema.clone(),
    );
    response.schema = Some(SchemaOrRef::reference(component.ref_path));
    response.type_expr = component.type_name;
    rebuild_full(info);
}

/// Title and description of an error schema, looking through references.
fn error_labels(
    resolver: &dyn SchemaResolver,
    schema: &SchemaOrRef,
) -> (Option<String>, Option<String>) {
    let inline = match schema {
        SchemaOrRef::Schema(schema) => Some(schema.as_ref().clone()),
        SchemaOrRef::Ref { ref_path } => {
            resolver
                .resolve_reference(ref_path)
                .and_then(|resolved| match resolved.target {
                    RefTarget::Schema(SchemaOrRef::Schema(schema)) => Some(*schema),
                    _ => None,
                })
        }
    };
    match inline {
        Some(schema) => (schema.title, schema.description),
        None => (None, None),
    }
}

/// Merge every error schema into one `oneOf` component and point the error
/// list at it. Skipped when no error response carries a schema.
pub fn extract_response_error(
    registry: &mut ComponentRegistry,
    resolver: &dyn SchemaResolver,
    info: &mut ResponseBodyInfo,
    route_usage: &str,
    options: &ExtractOptions,
) {
    let schemas: Vec<SchemaOrRef> = info
        .error
        .schemas
        .iter()
        .filter_map(|entry| match entry {
            ErrorSchema::Response { schema, .. } => schema.clone(),
            ErrorSchema::Component { .. } => None,
        })
        .collect();
    if schemas.is_empty() {
        return;
    }

    let mut titles = Vec::new();
    let mut descriptions = Vec::new();
    for schema in &schemas {
        let (title, description) = error_labels(resolver, schema);
        titles.extend(title.filter(|t| !t.is_empty()));
        descriptions.extend(description.filter(|d| !d.is_empty()));
    }
    let merged = Schema {
        title: (!titles.is_empty()).then(|| titles.join(" ")),
        description: (!descriptions.is_empty()).then(|| descriptions.join("\n")),
        one_of: schemas,
        ..Schema::default()
    };

    let component = hoist(
        registry,
        resolver,
        candidates(route_usage, &options.response_error_suffixes),
        merged.into(),
    );
    info.error.type_expr = component.type_name.clone();
    info.error.schemas = vec![ErrorSchema::Component {
        type_name: component.type_name,
        ref_path: component.ref_path,
    }];
}

/// Query parameters merged with path parameters (path wins on name clash),
/// or `None` without query parameters.
pub fn request_params_schema(params: &RouteParams) -> Option<Schema> {
    if params.query.is_empty() {
        return None;
    }
    Some(object_schema(params.query.iter().chain(&params.path)))
}
