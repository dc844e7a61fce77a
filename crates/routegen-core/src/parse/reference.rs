use std::collections::HashSet;

use super::components::Components;
use super::header::{Header, HeaderOrRef};
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// On-demand `$ref` lookup against `#/components/*`.
///
/// Unlike a whole-document resolver, nothing is inlined ahead of time: named
/// references have to survive so they can be rendered as type names. Chains of
/// references (`A -> B -> inline`) are followed; cycles are reported.
#[derive(Debug, Clone, Copy)]
pub struct RefLookup<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefLookup<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    pub fn from_components(components: Option<&'a Components>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> Option<&'a Components> {
        self.components
    }

    pub fn schema(&self, ref_path: &str) -> Result<&'a Schema, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "schemas")?;
            match self.components.and_then(|c| c.schemas.get(name)) {
                Some(SchemaOrRef::Schema(schema)) => return Ok(schema),
                Some(SchemaOrRef::Ref { ref_path: inner }) => current = inner,
                None => return Err(ResolveError::RefTargetNotFound(current.to_string())),
            }
        }
    }

    pub fn parameter(&self, ref_path: &str) -> Result<&'a Parameter, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "parameters")?;
            match self.components.and_then(|c| c.parameters.get(name)) {
                Some(ParameterOrRef::Parameter(param)) => return Ok(param),
                Some(ParameterOrRef::Ref { ref_path: inner }) => current = inner,
                None => return Err(ResolveError::RefTargetNotFound(current.to_string())),
            }
        }
    }

    pub fn request_body(&self, ref_path: &str) -> Result<&'a RequestBody, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "requestBodies")?;
            match self.components.and_then(|c| c.request_bodies.get(name)) {
                Some(RequestBodyOrRef::RequestBody(body)) => return Ok(body),
                Some(RequestBodyOrRef::Ref { ref_path: inner }) => current = inner,
                None => return Err(ResolveError::RefTargetNotFound(current.to_string())),
            }
        }
    }

    pub fn response(&self, ref_path: &str) -> Result<&'a Response, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "responses")?;
            match self.components.and_then(|c| c.responses.get(name)) {
                Some(ResponseOrRef::Response(resp)) => return Ok(resp),
                Some(ResponseOrRef::Ref { ref_path: inner }) => current = inner,
                None => return Err(ResolveError::RefTargetNotFound(current.to_string())),
            }
        }
    }

    pub fn header(&self, ref_path: &str) -> Result<&'a Header, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let name = parse_ref_name(current, "headers")?;
            match self.components.and_then(|c| c.headers.get(name)) {
                Some(HeaderOrRef::Header(header)) => return Ok(header),
                Some(HeaderOrRef::Ref { ref_path: inner }) => current = inner,
                None => return Err(ResolveError::RefTargetNotFound(current.to_string())),
            }
        }
    }
}

/// Swagger 2.0 reference roots and the components section each maps to.
const SWAGGER2_ROOTS: [(&str, &str); 3] = [
    ("#/definitions/", "schemas"),
    ("#/parameters/", "parameters"),
    ("#/responses/", "responses"),
];

/// Split a `$ref` like `#/components/schemas/Foo` into `("schemas", "Foo")`.
/// Swagger 2.0 forms (`#/definitions/Foo`) split the same way.
pub fn split_ref(ref_path: &str) -> Result<(&str, &str), ResolveError> {
    for (root, section) in SWAGGER2_ROOTS {
        if let Some(name) = ref_path.strip_prefix(root) {
            if name.is_empty() || name.contains('/') {
                return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
            }
            return Ok((section, name));
        }
    }
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section.is_empty() || name.is_empty() {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok((section, name))
}

/// Parse a `$ref` path and extract the name, checking the section.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let (section, name) = split_ref(ref_path)?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
