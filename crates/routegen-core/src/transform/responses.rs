use indexmap::IndexMap;

use crate::ir::{
    ContentKind, ErrorResponse, ErrorSchema, FullResponse, ResponseBodyInfo, ResponseInfo,
    ResponseStatus, SuccessResponse,
};
use crate::parse::header::HeaderOrRef;
use crate::parse::operation::Operation;
use crate::parse::response::{Response, ResponseOrRef};
use crate::schema::type_expr::{escape, join_unique, property_key};
use crate::schema::{ParsedSchema, RefTarget, SchemaResolver, UNKNOWN};

use super::body::{BodyNode, resolve_body_type};
use super::content::content_types;

/// How response statuses are classified and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRules {
    /// Treat the `default` response as a success.
    pub default_as_success: bool,
    /// Inclusive range of successful status codes.
    pub success_range: (u16, u16),
    /// Type for responses without a usable schema; `unknown` when unset.
    pub default_response_type: Option<String>,
}

impl Default for ResponseRules {
    fn default() -> Self {
        Self {
            default_as_success: false,
            success_range: (200, 299),
            default_response_type: None,
        }
    }
}

impl ResponseRules {
    pub fn is_success(&self, status: &ResponseStatus) -> bool {
        match status {
            ResponseStatus::Code(code) => {
                (self.success_range.0..=self.success_range.1).contains(code)
            }
            ResponseStatus::Token(token) => {
                (token == "default" && self.default_as_success) || token.eq_ignore_ascii_case("2xx")
            }
        }
    }
}

/// Dereference a response entry, `None` when the reference is dangling.
fn inline_response(resolver: &dyn SchemaResolver, entry: &ResponseOrRef) -> Option<Response> {
    match entry {
        ResponseOrRef::Response(response) => Some(response.clone()),
        ResponseOrRef::Ref { ref_path } => match resolver.resolve_reference(ref_path)?.target {
            RefTarget::Response(response) => Some(response),
            _ => None,
        },
    }
}

fn header_types(
    resolver: &dyn SchemaResolver,
    headers: &IndexMap<String, HeaderOrRef>,
) -> IndexMap<String, String> {
    headers
        .iter()
        .map(|(name, header)| {
            let schema = match header {
                HeaderOrRef::Header(header) => header.schema.clone(),
                HeaderOrRef::Ref { ref_path } => resolver
                    .resolve_reference(ref_path)
                    .and_then(|resolved| match resolved.target {
                        RefTarget::Header(header) => header.schema,
                        _ => None,
                    }),
            };
            let type_expr = schema
                .map(|s| resolver.inline_type_expression(&s))
                .unwrap_or_else(|| UNKNOWN.to_string());
            (name.clone(), type_expr)
        })
        .collect()
}

/// Classify and type every declared response of `op`, in document order.
pub fn aggregate_responses(
    resolver: &dyn SchemaResolver,
    parsed: &[ParsedSchema],
    op: &Operation,
    rules: &ResponseRules,
) -> ResponseBodyInfo {
    let operation_id = op.operation_id.as_deref();
    let default_type = rules.default_response_type.as_deref();

    let mut responses = Vec::with_capacity(op.responses.len());
    let mut declared = Vec::new();
    for (key, entry) in &op.responses {
        let status = ResponseStatus::parse(key);
        let inline = inline_response(resolver, entry).unwrap_or_default();
        let types = content_types(&[], [&inline.content]);
        let body = resolve_body_type(
            resolver,
            parsed,
            BodyNode::Response(entry),
            operation_id,
            default_type,
        );
        responses.push(ResponseInfo {
            is_success: rules.is_success(&status),
            status,
            content_kind: ContentKind::classify(&types),
            content_types: types,
            type_expr: resolver.decorate_nullable(body.nullable, body.type_expr),
            description: resolver.format_description(&inline.description, true),
            schema: body.schema,
            headers: header_types(resolver, &inline.headers),
        });
        declared.push(inline);
    }

    let explicit = op
        .accepts
        .as_ref()
        .map(|accepts| accepts.to_vec())
        .unwrap_or_default();
    let content_types = content_types(&explicit, declared.iter().map(|r| &r.content));

    let success = success_of(&responses);
    let error = error_of(&responses);
    let full = FullResponse {
        type_expr: full_type(&responses),
    };
    ResponseBodyInfo {
        content_types,
        responses,
        success,
        error,
        full,
    }
}

fn success_of(responses: &[ResponseInfo]) -> SuccessResponse {
    let index = responses.iter().position(|r| r.is_success);
    SuccessResponse {
        index,
        type_expr: index
            .map(|i| responses[i].type_expr.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn error_of(responses: &[ResponseInfo]) -> ErrorResponse {
    let schemas: Vec<ErrorSchema> = responses
        .iter()
        .filter(|r| !r.is_success && r.type_expr != UNKNOWN)
        .map(|r| ErrorSchema::Response {
            status: r.status.clone(),
            schema: r.schema.clone(),
            type_expr: r.type_expr.clone(),
        })
        .collect();
    let type_expr = if schemas.is_empty() {
        UNKNOWN.to_string()
    } else {
        join_unique(
            schemas.iter().filter_map(|s| match s {
                ErrorSchema::Response { type_expr, .. } => Some(type_expr.clone()),
                ErrorSchema::Component { type_name, .. } => Some(type_name.clone()),
            }),
            " | ",
        )
    };
    ErrorResponse { schemas, type_expr }
}

/// Result envelope for one response.
pub fn envelope(response: &ResponseInfo) -> String {
    let status = match response.status.code() {
        Some(code) => code.to_string(),
        None => "number".to_string(),
    };
    let headers = if response.headers.is_empty() {
        "{}".to_string()
    } else {
        let fields: Vec<String> = response
            .headers
            .iter()
            .map(|(name, ty)| format!("{}: {ty}", property_key(name)))
            .collect();
        format!("{{ {} }}", fields.join("; "))
    };
    format!(
        "{{ data: {data}; status: {status}; statusCode: {status}; statusText: \"{text}\"; headers: {headers}; config: {{}} }}",
        data = response.type_expr,
        text = escape(&response.description),
    )
}

fn full_type(responses: &[ResponseInfo]) -> String {
    if responses.is_empty() {
        return UNKNOWN.to_string();
    }
    join_unique(responses.iter().map(envelope), " | ")
}

/// Recompute `success` and `full` after entries were retyped.
pub fn rebuild_full(info: &mut ResponseBodyInfo) {
    if let Some(index) = info.success.index {
        if let Some(response) = info.responses.get(index) {
            info.success.type_expr = response.type_expr.clone();
        }
    }
    info.full.type_expr = full_type(&info.responses);
}
