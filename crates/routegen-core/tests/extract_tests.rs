use routegen_core::ir::{ErrorSchema, Route};
use routegen_core::parse;
use routegen_core::parse::schema::SchemaOrRef;
use routegen_core::transform::{self, ExtractOptions, TransformOptions};

const THINGS: &str = include_str!("fixtures/things.yaml");

fn extracting() -> TransformOptions {
    TransformOptions {
        extract: ExtractOptions {
            request_body: true,
            request_params: true,
            response_body: true,
            response_error: true,
            ..ExtractOptions::default()
        },
        ..TransformOptions::default()
    }
}

fn route<'a>(routes: &'a [Route], usage: &str) -> &'a Route {
    routes
        .iter()
        .find(|r| r.route_name.usage == usage)
        .unwrap_or_else(|| panic!("no route named {usage}"))
}

#[test]
fn success_and_error_types_without_extraction() {
    let spec = parse::from_yaml(THINGS).unwrap();
    let ir = transform::transform(&spec).unwrap();
    let get = route(&ir.routes, "getThing");

    let body = &get.response_body;
    assert_eq!(body.success.index, Some(0));
    assert_eq!(body.success.type_expr, "{ id?: string }");
    assert_eq!(body.error.type_expr, "{ message?: string }");
    assert_eq!(body.error.schemas.len(), 1);
    assert!(matches!(
        body.error.schemas[0],
        ErrorSchema::Response { .. }
    ));
    assert!(ir.components.is_empty());
}

#[test]
fn error_responses_collapse_into_one_component() {
    let spec = parse::from_yaml(THINGS).unwrap();
    let ir = transform::transform_with_options(&spec, &extracting()).unwrap();
    let get = route(&ir.routes, "getThing");

    let error = &get.response_body.error;
    assert_eq!(error.type_expr, "GetThingError");
    assert_eq!(
        error.schemas,
        vec![ErrorSchema::Component {
            type_name: "GetThingError".to_string(),
            ref_path: "#/components/schemas/GetThingError".to_string(),
        }]
    );

    let component = ir
        .components
        .iter()
        .find(|c| c.type_name == "GetThingError")
        .unwrap();
    let merged = component.schema.as_schema().unwrap();
    assert_eq!(merged.title.as_deref(), Some("NotFound"));
    assert_eq!(merged.description.as_deref(), Some("No thing under that id"));
    assert_eq!(merged.one_of.len(), 1);
}

#[test]
fn success_body_is_hoisted_and_full_rebuilt() {
    let spec = parse::from_yaml(THINGS).unwrap();
    let ir = transform::transform_with_options(&spec, &extracting()).unwrap();
    let get = route(&ir.routes, "getThing");

    let body = &get.response_body;
    assert_eq!(body.success.type_expr, "GetThingData");
    assert_eq!(body.responses[0].type_expr, "GetThingData");
    assert_eq!(
        body.responses[0].schema,
        Some(SchemaOrRef::reference("#/components/schemas/GetThingData"))
    );
    assert!(body.full.type_expr.starts_with("{ data: GetThingData; status: 200;"));
    assert!(body.full.type_expr.contains("data: { message?: string }; status: 404;"));
}

#[test]
fn identical_bodies_share_one_component() {
    let spec = parse::from_yaml(THINGS).unwrap();
    let ir = transform::transform_with_options(&spec, &extracting()).unwrap();

    let thing = route(&ir.routes, "createThing");
    let gadget = route(&ir.routes, "createGadget");
    assert_eq!(thing.request_body.type_expr.as_deref(), Some("CreateThingPayload"));
    assert_eq!(gadget.request_body.type_expr.as_deref(), Some("CreateThingPayload"));
    assert_eq!(gadget.request_body.schema, thing.request_body.schema);

    let names: Vec<&str> = ir.components.iter().map(|c| c.type_name.as_str()).collect();
    assert_eq!(names, vec!["GetThingData", "GetThingError", "CreateThingPayload"]);
}

#[test]
fn extraction_names_avoid_document_components() {
    let yaml = r#"
openapi: "3.0.3"
info:
  title: taken
  version: "1"
paths:
  /orders:
    post:
      operationId: createOrder
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                sku:
                  type: string
      responses:
        204:
          description: ok
components:
  schemas:
    CreateOrderPayload:
      type: string
    CreateOrderBody:
      type: string
    CreateOrderInput:
      type: string
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let ir = transform::transform_with_options(&spec, &extracting()).unwrap();
    assert_eq!(
        ir.routes[0].request_body.type_expr.as_deref(),
        Some("CreateOrderPayload2")
    );
}

#[test]
fn type_affixes_apply_to_components() {
    let spec = parse::from_yaml(THINGS).unwrap();
    let options = TransformOptions {
        type_prefix: "Api".to_string(),
        ..extracting()
    };
    let ir = transform::transform_with_options(&spec, &options).unwrap();
    let thing = route(&ir.routes, "createThing");
    assert_eq!(thing.request_body.type_expr.as_deref(), Some("ApiCreateThingPayload"));
}
