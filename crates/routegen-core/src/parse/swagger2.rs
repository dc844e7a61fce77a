//! Lifts a Swagger 2.0 document onto the OpenAPI 3.x model.
//!
//! Only the parts route building reads are moved: `definitions`,
//! `parameters` and `responses` become components, `in: body` parameters
//! become request bodies, response `schema`s move under `content`, and
//! form parameters get their media types from `consumes`. `#/definitions/`
//! style references keep their text and resolve through
//! [`split_ref`](super::reference::split_ref).

use std::mem;

use indexmap::IndexMap;
use log::debug;

use super::components::Components;
use super::header::HeaderOrRef;
use super::media_type::{Content, MediaType};
use super::operation::{MediaTypeList, Operation};
use super::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use super::reference::RefLookup;
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{SchemaType, TypeSet};
use super::spec::OpenApiSpec;

const DEFAULT_MEDIA_TYPE: &str = "application/json";
const URL_ENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// OpenAPI version recorded on an upgraded document.
pub const UPGRADED_VERSION: &str = "3.0.0";

/// Rewrite `spec` in place. `spec.swagger` is kept so callers can tell the
/// document was upgraded.
pub fn upgrade(spec: &mut OpenApiSpec) {
    let mut components = spec.components.take().unwrap_or_default();
    components.schemas.extend(mem::take(&mut spec.definitions));
    components.parameters.extend(mem::take(&mut spec.parameters));

    let consumes = mem::take(&mut spec.consumes);
    let produces = mem::take(&mut spec.produces);

    for (name, mut response) in mem::take(&mut spec.responses) {
        if let ResponseOrRef::Response(response) = &mut response {
            lift_response(response, &produces);
        }
        components.responses.insert(name, response);
    }

    for (path, item) in spec.paths.iter_mut() {
        let shared_body = take_body_parameter(&mut item.parameters, &components);
        for (method, op) in item.operations.iter_mut() {
            let op_consumes = op.consumes.take().unwrap_or_else(|| consumes.clone());
            let op_produces = op.produces.take().unwrap_or_else(|| produces.clone());

            let body = take_body_parameter(&mut op.parameters, &components)
                .or_else(|| shared_body.clone());
            if let Some(body) = body.filter(|_| op.request_body.is_none()) {
                debug!("{} {path}: body parameter lifted", method.as_str());
                lift_body(op, body, &op_consumes);
            }

            if op.content_type.is_none() {
                let form: Vec<&Parameter> = item
                    .parameters
                    .iter()
                    .chain(&op.parameters)
                    .filter_map(|entry| inline_parameter(entry, &components))
                    .filter(|p| p.location == Some(ParameterLocation::FormData))
                    .collect();
                if !form.is_empty() {
                    let types = form_media_types(&op_consumes, form.iter().any(|p| is_file(p)));
                    op.content_type = Some(MediaTypeList::Many(types));
                }
            }

            for response in op.responses.values_mut() {
                if let ResponseOrRef::Response(response) = response {
                    lift_response(response, &op_produces);
                }
            }
        }
    }

    spec.components = Some(components);
    spec.openapi = UPGRADED_VERSION.to_string();
}

fn inline_parameter<'a>(entry: &'a ParameterOrRef, components: &'a Components) -> Option<&'a Parameter> {
    match entry {
        ParameterOrRef::Parameter(param) => Some(param),
        ParameterOrRef::Ref { ref_path } => RefLookup::from_components(Some(components))
            .parameter(ref_path)
            .ok(),
    }
}

/// Remove the first `in: body` parameter from `params` and return it.
fn take_body_parameter(params: &mut Vec<ParameterOrRef>, components: &Components) -> Option<Parameter> {
    let index = params.iter().position(|entry| {
        inline_parameter(entry, components).is_some_and(|p| p.location == Some(ParameterLocation::Body))
    })?;
    let entry = params.remove(index);
    inline_parameter(&entry, components).cloned()
}

fn lift_body(op: &mut Operation, body: Parameter, consumes: &[String]) {
    let schema = body
        .schema
        .clone()
        .or_else(|| body.keyword_schema().map(Into::into));
    let mut media_types: Vec<&str> = consumes
        .iter()
        .map(String::as_str)
        .filter(|t| *t != URL_ENCODED && *t != MULTIPART)
        .collect();
    if media_types.is_empty() {
        media_types.push(DEFAULT_MEDIA_TYPE);
    }
    let content: Content = media_types
        .into_iter()
        .map(|t| {
            let media = MediaType {
                schema: schema.clone(),
                ..MediaType::default()
            };
            (t.to_string(), media)
        })
        .collect();

    if op.request_body_name.is_none() {
        op.request_body_name = body.name.clone();
    }
    op.request_body = Some(RequestBodyOrRef::RequestBody(RequestBody {
        description: body.description,
        content,
        required: Some(body.required),
        name: None,
    }));
}

fn is_file(param: &Parameter) -> bool {
    matches!(param.schema_type, Some(TypeSet::Single(SchemaType::File)))
}

/// Form media types declared in `consumes`, else the one the parameters need.
fn form_media_types(consumes: &[String], has_file: bool) -> Vec<String> {
    let declared: Vec<String> = consumes
        .iter()
        .filter(|t| *t == URL_ENCODED || *t == MULTIPART)
        .cloned()
        .collect();
    if !declared.is_empty() {
        return declared;
    }
    let fallback = if has_file { MULTIPART } else { URL_ENCODED };
    vec![fallback.to_string()]
}

fn lift_response(response: &mut Response, produces: &[String]) {
    if let Some(schema) = response.schema.take() {
        if response.content.is_empty() {
            let types: Vec<&str> = if produces.is_empty() {
                vec![DEFAULT_MEDIA_TYPE]
            } else {
                produces.iter().map(String::as_str).collect()
            };
            response.content = types
                .into_iter()
                .map(|t| {
                    let media = MediaType {
                        schema: Some(schema.clone()),
                        ..MediaType::default()
                    };
                    (t.to_string(), media)
                })
                .collect::<IndexMap<_, _>>();
        }
    }
    for header in response.headers.values_mut() {
        if let HeaderOrRef::Header(header) = header {
            if header.schema.is_none() {
                header.schema = header.keyword_schema().map(Into::into);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const DOC: &str = r##"
swagger: "2.0"
info:
  title: legacy store
  version: "1"
consumes: [application/json]
produces: [application/json]
paths:
  /pets:
    post:
      operationId: addPet
      parameters:
        - name: pet
          in: body
          required: true
          schema:
            $ref: "#/definitions/Pet"
      responses:
        200:
          description: ok
          schema:
            $ref: "#/definitions/Pet"
          headers:
            X-Rate-Limit:
              type: integer
        404:
          $ref: "#/responses/NotFound"
  /pets/{petId}/image:
    post:
      operationId: uploadImage
      consumes: [multipart/form-data]
      parameters:
        - name: petId
          in: path
          required: true
          type: integer
        - $ref: "#/parameters/Note"
        - name: file
          in: formData
          type: file
      responses:
        200:
          description: ok
definitions:
  Pet:
    type: object
    properties:
      name:
        type: string
parameters:
  Note:
    name: note
    in: formData
    type: string
responses:
  NotFound:
    description: missing
    schema:
      type: string
"##;

    #[test]
    fn definitions_become_components() {
        let spec = parse::from_yaml(DOC).unwrap();
        assert_eq!(spec.openapi, UPGRADED_VERSION);
        assert_eq!(spec.swagger.as_deref(), Some("2.0"));
        let components = spec.components.as_ref().unwrap();
        assert!(components.schemas.contains_key("Pet"));
        assert!(components.parameters.contains_key("Note"));
        let ResponseOrRef::Response(missing) = &components.responses["NotFound"] else {
            panic!("expected inline response");
        };
        assert!(missing.content.contains_key(DEFAULT_MEDIA_TYPE));
        assert!(spec.definitions.is_empty());
    }

    #[test]
    fn body_parameter_becomes_request_body() {
        let spec = parse::from_yaml(DOC).unwrap();
        let op = &spec.paths["/pets"].operations[0].1;
        assert!(op.parameters.is_empty());
        assert_eq!(op.request_body_name.as_deref(), Some("pet"));
        let Some(RequestBodyOrRef::RequestBody(body)) = &op.request_body else {
            panic!("expected inline request body");
        };
        assert_eq!(body.required, Some(true));
        let keys: Vec<&str> = body.content.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["application/json"]);

        let ResponseOrRef::Response(ok) = &op.responses["200"] else {
            panic!("expected inline response");
        };
        assert!(ok.schema.is_none());
        assert!(ok.content["application/json"].schema.is_some());
        let HeaderOrRef::Header(limit) = &ok.headers["X-Rate-Limit"] else {
            panic!("expected inline header");
        };
        assert!(limit.schema.is_some());
    }

    #[test]
    fn form_parameters_take_consumes() {
        let spec = parse::from_yaml(DOC).unwrap();
        let op = &spec.paths["/pets/{petId}/image"].operations[0].1;
        assert_eq!(
            op.content_type,
            Some(MediaTypeList::Many(vec![MULTIPART.to_string()]))
        );
        assert!(op.request_body.is_none());
    }

    #[test]
    fn form_media_type_fallbacks() {
        assert_eq!(form_media_types(&[], true), vec![MULTIPART]);
        assert_eq!(form_media_types(&[], false), vec![URL_ENCODED]);
        let declared = vec![DEFAULT_MEDIA_TYPE.to_string(), URL_ENCODED.to_string()];
        assert_eq!(form_media_types(&declared, true), vec![URL_ENCODED]);
    }
}
