use routegen_core::error::ParseError;
use routegen_core::parse;
use routegen_core::parse::operation::HttpMethod;
use routegen_core::parse::parameter::{ParameterLocation, ParameterOrRef};
use routegen_core::parse::response::ResponseOrRef;
use routegen_core::parse::schema::SchemaOrRef;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const LEGACY: &str = include_str!("fixtures/legacy.yaml");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Petstore");
    assert_eq!(spec.paths.len(), 4);
    assert!(spec.has_global_security());

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 3);
    assert_eq!(components.request_bodies.len(), 1);
    assert!(components.parameters.contains_key("Limit"));
}

#[test]
fn path_item_keeps_document_order() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let item = spec.paths.get("/pets/{petId}").unwrap();
    let methods: Vec<HttpMethod> = item.operations.iter().map(|(m, _)| *m).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    assert_eq!(item.parameters.len(), 1);

    let delete = item.operation(HttpMethod::Delete).unwrap();
    assert_eq!(delete.security.as_ref().map(Vec::len), Some(0));
}

#[test]
fn integer_response_keys_are_strings() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let get = spec.paths["/pets/{petId}"].operation(HttpMethod::Get).unwrap();
    let keys: Vec<&str> = get.responses.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["200", "404"]);
    assert!(matches!(get.responses["404"], ResponseOrRef::Ref { .. }));
}

#[test]
fn vendor_extensions_are_typed() {
    let spec = parse::from_yaml(LEGACY).unwrap();
    let upload = spec.paths["/files/{query}/{data}"]
        .operation(HttpMethod::Post)
        .unwrap();
    assert_eq!(upload.request_body_name.as_deref(), Some("query"));

    let form = spec.paths["/forms/{form-id}"]
        .operation(HttpMethod::Post)
        .unwrap();
    let content_type = form.content_type.as_ref().unwrap().to_vec();
    assert_eq!(content_type, vec!["multipart/form-data"]);
}

#[test]
fn unknown_parameter_locations_survive_parsing() {
    let spec = parse::from_yaml(LEGACY).unwrap();
    let form = spec.paths["/forms/{form-id}"]
        .operation(HttpMethod::Post)
        .unwrap();
    let locations: Vec<ParameterLocation> = form
        .parameters
        .iter()
        .filter_map(|p| match p {
            ParameterOrRef::Parameter(param) => param.location.clone(),
            ParameterOrRef::Ref { .. } => None,
        })
        .collect();
    assert_eq!(
        locations,
        vec![
            ParameterLocation::FormData,
            ParameterLocation::FormData,
            ParameterLocation::Other("matrix".to_string()),
            ParameterLocation::Cookie,
        ]
    );
}

#[test]
fn parse_json_document() {
    let json = r##"{
        "openapi": "3.1.0",
        "info": {"title": "Json", "version": "1"},
        "paths": {
            "/ping": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "pong",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pong"}}}
                        }
                    }
                }
            }
        },
        "components": {"schemas": {"Pong": {"type": ["string", "null"]}}}
    }"##;
    let spec = parse::from_json(json).unwrap();
    assert_eq!(spec.openapi, "3.1.0");
    let pong = &spec.components.as_ref().unwrap().schemas["Pong"];
    assert!(matches!(pong, SchemaOrRef::Schema(_)));
    assert!(pong.permits_null());
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(result.is_err());
}

#[test]
fn swagger2_documents_are_upgraded() {
    let spec = parse::from_yaml(include_str!("fixtures/swagger2.yaml")).unwrap();
    assert_eq!(spec.openapi, parse::swagger2::UPGRADED_VERSION);
    assert_eq!(spec.swagger.as_deref(), Some("2.0"));
    let components = spec.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Pet"));
    assert!(components.responses.contains_key("NotFound"));
}

#[test]
fn other_swagger_versions_are_rejected() {
    let yaml = r#"
swagger: "1.2"
info:
  title: Old
  version: "1.0"
paths: {}
"#;
    match parse::from_yaml(yaml) {
        Err(ParseError::UnsupportedVersion(v)) => assert_eq!(v, "1.2"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn documents_without_a_version_are_rejected() {
    let json = r#"{"info":{"title":"None","version":"1"},"paths":{}}"#;
    assert!(matches!(
        parse::from_json(json),
        Err(ParseError::MissingVersion)
    ));
}

#[test]
fn parse_malformed_yaml() {
    assert!(parse::from_yaml("openapi: [").is_err());
}
