use routegen_core::error::{NameResolveError, TransformError};
use routegen_core::ir::{ContentKind, ParamOrigin, Route};
use routegen_core::parse;
use routegen_core::transform::{self, ExtractOptions, TransformOptions};

const LEGACY: &str = include_str!("fixtures/legacy.yaml");

fn routes() -> Vec<Route> {
    let spec = parse::from_yaml(LEGACY).unwrap();
    transform::transform(&spec).unwrap().routes
}

#[test]
fn argument_names_never_collide() {
    let routes = routes();
    let upload = &routes[0];
    assert_eq!(upload.route_name.usage, "uploadFile");

    let path_args: Vec<&str> = upload.path_args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(path_args, vec!["query", "data"]);

    let args = &upload.specific_args;
    assert_eq!(args.names(), vec!["queryParams", "body", "path", "headers"]);
    assert_eq!(upload.request_body.name, "body");

    let mut all: Vec<&str> = path_args.clone();
    all.extend(args.names());
    let mut unique = all.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), all.len());
}

#[test]
fn request_params_merge_query_and_path() {
    let routes = routes();
    let params = routes[0].request_params.as_ref().unwrap();
    assert_eq!(params.type_expr, "{ q?: string; query: string; data: string }");
}

#[test]
fn form_data_parameters_become_the_body() {
    let routes = routes();
    let form = &routes[1];

    assert_eq!(form.path, "/forms/${formId}");
    assert_eq!(form.path_args[0].name, "formId");
    assert!(form.is_form_data());
    assert_eq!(form.request_body.content_types, vec!["multipart/form-data"]);
    assert_eq!(
        form.request_body.type_expr.as_deref(),
        Some("{ title: string; attachment?: File }")
    );
    assert!(form.request_body.required);
    assert_eq!(form.route_params.form_data.len(), 2);
    assert_eq!(form.route_params.other["matrix"].len(), 1);
    assert_eq!(form.route_params.cookie.len(), 1);
}

#[test]
fn query_templates_become_query_parameters() {
    let routes = routes();
    let search = &routes[2];

    assert_eq!(search.path, "/search");
    assert_eq!(search.namespace.as_deref(), Some("search"));
    let names: Vec<&str> = search
        .route_params
        .query
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["term", "limit"]);
    assert!(search.route_params.query.iter().all(|p| p.required));
    assert!(matches!(
        search.route_params.query[0].origin,
        ParamOrigin::Synthesized { .. }
    ));
    let query = search.specific_args.query.as_ref().unwrap();
    assert!(!query.optional);
}

#[test]
fn colon_tokens_are_path_parameters() {
    let routes = routes();
    let events = &routes[3];

    assert_eq!(events.path, "/v1/accounts/${accountId}/events");
    assert_eq!(events.namespace.as_deref(), Some("v1"));
    assert_eq!(events.path_args[0].name, "accountId");
    assert_eq!(events.path_args[0].type_expr, "string");
}

#[test]
fn extracted_request_params_use_the_params_suffix() {
    let spec = parse::from_yaml(LEGACY).unwrap();
    let options = TransformOptions {
        extract: ExtractOptions {
            request_params: true,
            ..ExtractOptions::default()
        },
        ..TransformOptions::default()
    };
    let ir = transform::transform_with_options(&spec, &options).unwrap();
    let params = ir.routes[0].request_params.as_ref().unwrap();
    assert_eq!(params.type_expr, "UploadFileParams");
    assert_eq!(ir.components[0].ref_path, "#/components/schemas/UploadFileParams");
    assert_eq!(ir.routes[0].request_body.content_kind, ContentKind::Json);
}

#[test]
fn exhausted_argument_names_fail_the_route() {
    let yaml = r#"
openapi: "3.0.3"
info:
  title: crowded
  version: "1"
paths:
  /x/{headers}/{headersParams}:
    get:
      operationId: crowded
      parameters:
        - name: X-Trace
          in: header
          schema:
            type: string
      responses:
        200:
          description: ok
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let err = transform::transform(&spec).unwrap_err();
    match err {
        TransformError::ArgName { route, source } => {
            assert_eq!(route, "GET /x/{headers}/{headersParams}");
            assert!(matches!(source, NameResolveError::Exhausted { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parameter_level_keywords_type_the_arguments() {
    let yaml = r#"
openapi: "3.0.3"
info:
  title: keywords
  version: "1"
paths:
  /items:
    post:
      operationId: addItem
      parameters:
        - name: limit
          in: query
          type: integer
          enum: [10, 20]
        - name: upload
          in: formData
          type: file
          required: true
      responses:
        200:
          description: ok
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let routes = transform::transform(&spec).unwrap().routes;
    let add = &routes[0];

    let query = add.specific_args.query.as_ref().unwrap();
    assert_eq!(query.type_expr, "{ limit?: 10 | 20 }");
    assert!(add.is_form_data());
    assert_eq!(
        add.request_body.type_expr.as_deref(),
        Some("{ upload: File }")
    );
}
