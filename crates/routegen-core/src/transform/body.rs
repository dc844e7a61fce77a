use log::debug;

use crate::parse::media_type::{Content, first_schema};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::SchemaOrRef;
use crate::schema::{ComponentCategory, ParsedSchema, RefTarget, SchemaResolver, UNKNOWN};

/// A request body or a single response, as declared.
#[derive(Debug, Clone, Copy)]
pub enum BodyNode<'a> {
    Request(&'a RequestBodyOrRef),
    Response(&'a ResponseOrRef),
}

impl<'a> BodyNode<'a> {
    fn content(&self) -> Option<&'a Content> {
        match self {
            BodyNode::Request(RequestBodyOrRef::RequestBody(body)) => Some(&body.content),
            BodyNode::Response(ResponseOrRef::Response(response)) => Some(&response.content),
            _ => None,
        }
    }

    fn ref_path(&self) -> Option<&'a str> {
        match self {
            BodyNode::Request(RequestBodyOrRef::Ref { ref_path })
            | BodyNode::Response(ResponseOrRef::Ref { ref_path }) => Some(ref_path.as_str()),
            _ => None,
        }
    }
}

/// Outcome of body type resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBody {
    pub type_expr: String,
    /// The inline content schema, or a `$ref` to the named schema it was
    /// matched against. `None` when the type came from elsewhere.
    pub schema: Option<SchemaOrRef>,
    /// Whether the content schema permits `null`.
    pub nullable: bool,
}

impl ResolvedBody {
    fn fallback(default_type: Option<&str>) -> Self {
        Self {
            type_expr: default_type.unwrap_or(UNKNOWN).to_string(),
            schema: None,
            nullable: false,
        }
    }

    fn named(type_name: String) -> Self {
        Self {
            type_expr: type_name,
            schema: None,
            nullable: false,
        }
    }
}

/// Remove the operation id from a referenced component name.
///
/// Some Swagger 2 converters name inline bodies `<operationId><Name>`; the
/// un-prefixed name is what the document's schemas actually use. Kept as a
/// narrow special case for that producer.
pub fn strip_operation_id_artifact(name: &str, operation_id: Option<&str>) -> String {
    match operation_id.filter(|id| !id.is_empty()) {
        Some(id) => {
            let stripped = name.replacen(id, "", 1);
            if stripped.is_empty() {
                name.to_string()
            } else {
                stripped
            }
        }
        None => name.to_string(),
    }
}

/// A named schema whose formatted name equals `expr`, else one whose content
/// equals it. Content matching is limited to composite expressions so that a
/// plain `string` body is not renamed after some string alias.
pub fn find_reusable<'p>(parsed: &'p [ParsedSchema], expr: &str) -> Option<&'p ParsedSchema> {
    parsed.iter().find(|s| s.type_name == expr).or_else(|| {
        if !is_composite(expr) {
            return None;
        }
        parsed.iter().find(|s| s.content == expr)
    })
}

fn is_composite(expr: &str) -> bool {
    expr.contains(['{', '[', '|', '&', '<'])
}

/// Resolve the type expression of a body. Never fails: anything that cannot
/// be resolved becomes `default_type`, or `unknown` without one.
pub fn resolve_body_type(
    resolver: &dyn SchemaResolver,
    parsed: &[ParsedSchema],
    node: BodyNode<'_>,
    operation_id: Option<&str>,
    default_type: Option<&str>,
) -> ResolvedBody {
    if let Some((_, schema)) = node.content().and_then(first_schema) {
        let expr = resolver.inline_type_expression(schema);
        let nullable = schema.permits_null();
        return match find_reusable(parsed, &expr) {
            Some(found) => {
                debug!("reusing {} for {expr}", found.type_name);
                ResolvedBody {
                    type_expr: found.type_name.clone(),
                    schema: Some(SchemaOrRef::reference(found.ref_path.clone())),
                    nullable,
                }
            }
            None => ResolvedBody {
                type_expr: expr,
                schema: Some(schema.clone()),
                nullable,
            },
        };
    }

    let Some(ref_path) = node.ref_path() else {
        return ResolvedBody::fallback(default_type);
    };
    let Some(resolved) = resolver.resolve_reference(ref_path) else {
        return ResolvedBody::fallback(default_type);
    };

    let stripped = resolver.format_identifier(&strip_operation_id_artifact(
        &resolved.name,
        operation_id,
    ));
    if let Some(found) = parsed.iter().find(|s| s.type_name == stripped) {
        return ResolvedBody::named(found.type_name.clone());
    }

    match resolved.category {
        ComponentCategory::Schemas => ResolvedBody::named(resolved.type_name),
        ComponentCategory::Responses | ComponentCategory::RequestBodies => {
            let inline: OwnedBody = match resolved.target {
                RefTarget::Response(response) => ResponseOrRef::Response(response).into(),
                RefTarget::RequestBody(body) => RequestBodyOrRef::RequestBody(body).into(),
                _ => return ResolvedBody::fallback(default_type),
            };
            let body = resolve_body_type(
                resolver,
                parsed,
                inline.as_node(),
                operation_id,
                default_type,
            );
            // The content belongs to another component; nothing to hoist here
            ResolvedBody {
                schema: None,
                ..body
            }
        }
        ComponentCategory::Other(_) => {
            let schema = match &resolved.target {
                RefTarget::Schema(schema) => Some(schema),
                RefTarget::Parameter(param) => param.schema.as_ref(),
                RefTarget::Header(header) => header.schema.as_ref(),
                _ => None,
            };
            match schema {
                Some(schema) => ResolvedBody::named(resolver.inline_type_expression(schema)),
                None => ResolvedBody::fallback(default_type),
            }
        }
    }
}

/// Owned body used when re-entering resolution on a dereferenced component.
enum OwnedBody {
    Request(RequestBodyOrRef),
    Response(ResponseOrRef),
}

impl OwnedBody {
    fn as_node(&self) -> BodyNode<'_> {
        match self {
            OwnedBody::Request(body) => BodyNode::Request(body),
            OwnedBody::Response(response) => BodyNode::Response(response),
        }
    }
}

impl From<RequestBodyOrRef> for OwnedBody {
    fn from(value: RequestBodyOrRef) -> Self {
        OwnedBody::Request(value)
    }
}

impl From<ResponseOrRef> for OwnedBody {
    fn from(value: ResponseOrRef) -> Self {
        OwnedBody::Response(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::spec::OpenApiSpec;
    use crate::schema::{ComponentRegistry, DefaultSchemaResolver};

    const DOC: &str = r##"
openapi: "3.0.3"
info:
  title: bodies
  version: "1"
paths: {}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id:
          type: string
    Name:
      type: string
    Cat:
      type: object
      properties:
        meow:
          type: boolean
  responses:
    PetResponse:
      description: a pet
      content:
        application/json:
          schema:
            $ref: "#/components/schemas/Pet"
    addCatCat:
      description: artifact of a converter
      content:
        application/json:
          schema:
            type: object
  requestBodies:
    NewPet:
      content:
        application/json:
          schema:
            type: object
            properties:
              name:
                type: string
"##;

    fn spec() -> OpenApiSpec {
        parse::from_yaml(DOC).unwrap()
    }

    fn response(json: &str) -> ResponseOrRef {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn inline_schema_matching_a_component_reuses_its_name() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let resp = response(
            r#"{"description":"ok","content":{"application/json":{"schema":{"type":"object","required":["id"],"properties":{"id":{"type":"string"}}}}}}"#,
        );
        let body = resolve_body_type(
            &resolver,
            registry.parsed_schemas(),
            BodyNode::Response(&resp),
            None,
            None,
        );
        assert_eq!(body.type_expr, "Pet");
        assert_eq!(
            body.schema,
            Some(SchemaOrRef::reference("#/components/schemas/Pet"))
        );
    }

    #[test]
    fn primitive_bodies_keep_their_expression() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let resp = response(
            r#"{"description":"ok","content":{"text/plain":{"schema":{"type":"string"}}}}"#,
        );
        let body = resolve_body_type(
            &resolver,
            registry.parsed_schemas(),
            BodyNode::Response(&resp),
            None,
            None,
        );
        assert_eq!(body.type_expr, "string");
    }

    #[test]
    fn referenced_response_recurses_into_content() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let resp = response(r##"{"$ref":"#/components/responses/PetResponse"}"##);
        let body = resolve_body_type(
            &resolver,
            registry.parsed_schemas(),
            BodyNode::Response(&resp),
            None,
            None,
        );
        assert_eq!(body.type_expr, "Pet");
        assert!(body.schema.is_none());
    }

    #[test]
    fn referenced_request_body_uses_inline_content() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let body_ref: RequestBodyOrRef =
            serde_json::from_str(r##"{"$ref":"#/components/requestBodies/NewPet"}"##).unwrap();
        let body = resolve_body_type(
            &resolver,
            registry.parsed_schemas(),
            BodyNode::Request(&body_ref),
            None,
            None,
        );
        assert_eq!(body.type_expr, "{ name?: string }");
    }

    #[test]
    fn operation_id_artifact_maps_to_schema() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let resp = response(r##"{"$ref":"#/components/responses/addCatCat"}"##);
        let body = resolve_body_type(
            &resolver,
            registry.parsed_schemas(),
            BodyNode::Response(&resp),
            Some("addCat"),
            None,
        );
        assert_eq!(body.type_expr, "Cat");
        assert_eq!(strip_operation_id_artifact("addCatCat", Some("addCat")), "Cat");
        assert_eq!(strip_operation_id_artifact("addCat", Some("addCat")), "addCat");
    }

    #[test]
    fn only_the_first_operation_id_occurrence_is_stripped() {
        assert_eq!(
            strip_operation_id_artifact("petBodypet", Some("pet")),
            "Bodypet"
        );
        assert_eq!(
            strip_operation_id_artifact("getPetgetPet", Some("getPet")),
            "getPet"
        );
    }

    #[test]
    fn unresolvable_bodies_fall_back() {
        let spec = spec();
        let resolver = DefaultSchemaResolver::new(&spec);
        let registry = ComponentRegistry::from_spec(&spec, &resolver);
        let missing = response(r##"{"$ref":"#/components/responses/Gone"}"##);
        let empty = response(r#"{"description":"no content"}"#);
        let parsed = registry.parsed_schemas();

        let body = resolve_body_type(&resolver, parsed, BodyNode::Response(&missing), None, None);
        assert_eq!(body.type_expr, UNKNOWN);
        let body = resolve_body_type(
            &resolver,
            parsed,
            BodyNode::Response(&empty),
            None,
            Some("void"),
        );
        assert_eq!(body.type_expr, "void");
    }
}
