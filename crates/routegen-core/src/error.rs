use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("document declares neither `openapi` nor `swagger`")]
    MissingVersion,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("circular reference detected: {0}")]
    CircularRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml_ng::Error,
    },
}

/// Raised when every argument-name candidate is already taken.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameResolveError {
    #[error("no free argument name among {candidates:?} (reserved: {reserved:?})")]
    Exhausted {
        candidates: Vec<String>,
        reserved: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("argument naming failed for {route}: {source}")]
    ArgName {
        route: String,
        source: NameResolveError,
    },

    #[error("route name template failed: {0}")]
    Template(#[from] minijinja::Error),
}
