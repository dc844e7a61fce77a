pub mod components;
pub mod header;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;
pub mod swagger2;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Parse an OpenAPI 3.x or Swagger 2.0 document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let mut spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    check_version(&mut spec)?;
    Ok(spec)
}

/// Parse an OpenAPI 3.x or Swagger 2.0 document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let mut spec: OpenApiSpec = serde_json::from_str(input)?;
    check_version(&mut spec)?;
    Ok(spec)
}

/// Accept 3.x as is and lift 2.x onto the 3.x model.
fn check_version(spec: &mut OpenApiSpec) -> Result<(), ParseError> {
    let swagger = spec.swagger.clone();
    match swagger.as_deref() {
        Some(version) if version.starts_with("2.") => {
            swagger2::upgrade(spec);
            Ok(())
        }
        Some(version) => Err(ParseError::UnsupportedVersion(version.to_string())),
        None if spec.openapi.starts_with("3.") => Ok(()),
        None if spec.openapi.is_empty() => Err(ParseError::MissingVersion),
        None => Err(ParseError::UnsupportedVersion(spec.openapi.clone())),
    }
}
