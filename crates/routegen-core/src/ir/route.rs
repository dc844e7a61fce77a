use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::parse::operation::HttpMethod;
use crate::parse::parameter::ParameterLocation;
use crate::parse::schema::SchemaOrRef;

static NEXT_ROUTE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique route identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(u64);

impl RouteId {
    pub fn next() -> Self {
        RouteId(NEXT_ROUTE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Route name before and after collision handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteName {
    pub original: String,
    pub usage: String,
    pub duplicate: bool,
}

/// Where a classified parameter came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamOrigin {
    Explicit,
    Referenced { ref_path: String },
    /// Taken from the path template (`{id}`, `:id`) or a `{?query}` expansion.
    Synthesized { token: String },
}

/// A parameter after merging with its schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteParam {
    pub name: String,
    pub original_name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    pub schema: SchemaOrRef,
    pub origin: ParamOrigin,
}

/// Parameters bucketed by location.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteParams {
    pub path: Vec<RouteParam>,
    pub header: Vec<RouteParam>,
    pub body: Vec<RouteParam>,
    pub query: Vec<RouteParam>,
    #[serde(rename = "formData")]
    pub form_data: Vec<RouteParam>,
    pub cookie: Vec<RouteParam>,
    /// Buckets for `in` values outside the six known locations.
    #[serde(flatten)]
    pub other: IndexMap<String, Vec<RouteParam>>,
}

impl RouteParams {
    pub fn bucket(&self, location: &ParameterLocation) -> &[RouteParam] {
        match location {
            ParameterLocation::Path => &self.path,
            ParameterLocation::Header => &self.header,
            ParameterLocation::Body => &self.body,
            ParameterLocation::Query => &self.query,
            ParameterLocation::FormData => &self.form_data,
            ParameterLocation::Cookie => &self.cookie,
            ParameterLocation::Other(name) => self.other.get(name).map_or(&[], Vec::as_slice),
        }
    }

    pub fn bucket_mut(&mut self, location: &ParameterLocation) -> &mut Vec<RouteParam> {
        match location {
            ParameterLocation::Path => &mut self.path,
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::Body => &mut self.body,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::FormData => &mut self.form_data,
            ParameterLocation::Cookie => &mut self.cookie,
            ParameterLocation::Other(name) => self.other.entry(name.clone()).or_default(),
        }
    }
}

/// A path argument of the generated call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathArg {
    pub name: String,
    pub optional: bool,
    #[serde(rename = "type")]
    pub type_expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Coarse classification of a set of media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Json,
    UrlEncoded,
    FormData,
    Image,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBodyInfo {
    /// Argument name for the body.
    pub name: String,
    pub content_types: Vec<String>,
    pub content_kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Merged query/path parameter object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestParamsInfo {
    pub schema: SchemaOrRef,
    #[serde(rename = "type")]
    pub type_expr: String,
}

/// A response status key: a numeric code or a token such as `default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Code(u16),
    Token(String),
}

impl ResponseStatus {
    pub fn parse(key: &str) -> Self {
        match key.trim().parse::<u16>() {
            Ok(code) => ResponseStatus::Code(code),
            Err(_) => ResponseStatus::Token(key.to_string()),
        }
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            ResponseStatus::Code(code) => Some(*code),
            ResponseStatus::Token(_) => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Code(code) => write!(f, "{code}"),
            ResponseStatus::Token(token) => f.write_str(token),
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseStatus::Code(code) => serializer.serialize_u16(*code),
            ResponseStatus::Token(token) => serializer.serialize_str(token),
        }
    }
}

/// One declared response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseInfo {
    pub status: ResponseStatus,
    pub content_types: Vec<String>,
    pub content_kind: ContentKind,
    #[serde(rename = "type")]
    pub type_expr: String,
    pub description: String,
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
    /// Header name → type expression.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    /// Index into `ResponseBodyInfo::responses`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(rename = "type")]
    pub type_expr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorSchema {
    Response {
        status: ResponseStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        schema: Option<SchemaOrRef>,
        #[serde(rename = "type")]
        type_expr: String,
    },
    /// All error schemas hoisted into one component.
    Component { type_name: String, ref_path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub schemas: Vec<ErrorSchema>,
    #[serde(rename = "type")]
    pub type_expr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullResponse {
    #[serde(rename = "type")]
    pub type_expr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseBodyInfo {
    pub content_types: Vec<String>,
    pub responses: Vec<ResponseInfo>,
    pub success: SuccessResponse,
    pub error: ErrorResponse,
    pub full: FullResponse,
}

/// A named argument bag of the generated call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificArg {
    pub name: String,
    pub optional: bool,
    #[serde(rename = "type")]
    pub type_expr: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpecificArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<SpecificArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<SpecificArg>,
    #[serde(rename = "pathParams", skip_serializing_if = "Option::is_none")]
    pub path_params: Option<SpecificArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<SpecificArg>,
}

impl SpecificArgs {
    /// Names of every resolved bag, in query/body/pathParams/headers order.
    pub fn names(&self) -> Vec<&str> {
        [&self.query, &self.body, &self.path_params, &self.headers]
            .into_iter()
            .flatten()
            .map(|arg| arg.name.as_str())
            .collect()
    }
}

/// Operation metadata passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRouteInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    pub original_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
}

/// One (path, method) operation, fully resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub id: RouteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub route_name: RouteName,
    pub method: HttpMethod,
    /// Path with `${name}` placeholders.
    pub path: String,
    pub route_params: RouteParams,
    pub path_args: Vec<PathArg>,
    pub request_body: RequestBodyInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_params: Option<RequestParamsInfo>,
    pub response_body: ResponseBodyInfo,
    pub specific_args: SpecificArgs,
    pub security: bool,
    pub raw: RawRouteInfo,
}

impl Route {
    pub fn is_form_data(&self) -> bool {
        self.request_body.content_kind == ContentKind::FormData
    }
}
