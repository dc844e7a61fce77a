use indexmap::IndexMap;
use log::debug;

use crate::ir::{ParamOrigin, RouteParam, RouteParams};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::schema::{RefTarget, SchemaResolver};

use super::name_normalizer::camel_case;
use super::path_template::{PathParameter, PathTemplate};

/// Where a declared or implied parameter comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource<'a> {
    Explicit(&'a Parameter),
    Referenced {
        ref_path: &'a str,
        parameter: Parameter,
    },
    Synthesized(&'a PathParameter),
}

impl ParameterSource<'_> {
    /// Merge into a bucketed descriptor. `None` for parameters without a
    /// name or location.
    pub fn into_route_param(self) -> Option<RouteParam> {
        match self {
            ParameterSource::Explicit(param) => merge_declared(param, ParamOrigin::Explicit),
            ParameterSource::Referenced {
                ref_path,
                parameter,
            } => merge_declared(
                &parameter,
                ParamOrigin::Referenced {
                    ref_path: ref_path.to_string(),
                },
            ),
            ParameterSource::Synthesized(implied) => Some(merge_synthesized(implied)),
        }
    }
}

fn merge_declared(param: &Parameter, origin: ParamOrigin) -> Option<RouteParam> {
    let location = param.location.clone()?;
    let raw_name = param.name.as_deref().filter(|n| !n.is_empty())?;
    let name = match location {
        ParameterLocation::Path => camel_case(raw_name),
        _ => raw_name.to_string(),
    };

    // Schema attributes win over parameter attributes
    let schema_description = param
        .schema
        .as_ref()
        .and_then(SchemaOrRef::as_schema)
        .and_then(|s| s.description.clone());
    let schema = declared_schema(param);

    Some(RouteParam {
        name,
        original_name: raw_name.to_string(),
        location,
        required: param.required,
        description: schema_description.or_else(|| param.description.clone()),
        deprecated: param.deprecated.unwrap_or(false),
        schema,
        origin,
    })
}

/// Keywords on the parameter overlaid by its `schema`; schema keywords win.
/// A `$ref` schema is taken as is.
fn declared_schema(param: &Parameter) -> SchemaOrRef {
    match (param.schema.clone(), param.keyword_schema()) {
        (Some(SchemaOrRef::Schema(schema)), Some(base)) => overlay(base, *schema).into(),
        (Some(schema), _) => schema,
        (None, Some(base)) => base.into(),
        (None, None) => Schema::default().into(),
    }
}

fn overlay(base: Schema, top: Schema) -> Schema {
    let enum_values = if top.enum_values.is_empty() {
        base.enum_values
    } else {
        top.enum_values
    };
    Schema {
        schema_type: top.schema_type.or(base.schema_type),
        format: top.format.or(base.format),
        items: top.items.or(base.items),
        default_value: top.default_value.or(base.default_value),
        enum_values,
        ..top
    }
}

fn merge_synthesized(implied: &PathParameter) -> RouteParam {
    RouteParam {
        name: implied.name.clone(),
        original_name: implied.name.clone(),
        location: implied.location.clone(),
        required: true,
        description: None,
        deprecated: false,
        schema: Schema::string().into(),
        origin: ParamOrigin::Synthesized {
            token: implied.token.clone(),
        },
    }
}

/// Bucket declared parameters (path-level first, then the operation's own)
/// and add the parameters implied by the path template. A later declaration
/// with the same name and location replaces an earlier one; declared
/// parameters always win over implied ones.
pub fn classify_parameters(
    declared: &[&ParameterOrRef],
    template: &PathTemplate,
    resolver: &dyn SchemaResolver,
) -> RouteParams {
    let mut params = RouteParams::default();

    for entry in declared {
        let source = match entry {
            ParameterOrRef::Parameter(param) => ParameterSource::Explicit(param),
            ParameterOrRef::Ref { ref_path } => match resolver.resolve_reference(ref_path) {
                Some(resolved) => match resolved.target {
                    RefTarget::Parameter(parameter) => ParameterSource::Referenced {
                        ref_path,
                        parameter,
                    },
                    _ => {
                        debug!("{ref_path} is not a parameter, skipping");
                        continue;
                    }
                },
                None => {
                    debug!("unresolved parameter {ref_path}, skipping");
                    continue;
                }
            },
        };
        let Some(param) = source.into_route_param() else {
            continue;
        };
        let bucket = params.bucket_mut(&param.location);
        match bucket.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => bucket.push(param),
        }
    }

    let implied = template.path_params.iter().chain(&template.query_params);
    for implied in implied {
        let bucket = params.bucket_mut(&implied.location);
        if bucket.iter().any(|p| p.name == implied.name) {
            continue;
        }
        if let Some(param) = ParameterSource::Synthesized(implied).into_route_param() {
            bucket.push(param);
        }
    }

    params
}

/// Property name used for a parameter inside an object schema.
pub fn property_name(param: &RouteParam) -> String {
    if param.name.contains('.') {
        camel_case(&param.name)
    } else {
        param.name.clone()
    }
}

/// Object schema whose properties are `params`.
pub fn object_schema<'p>(params: impl IntoIterator<Item = &'p RouteParam>) -> Schema {
    let mut properties: IndexMap<String, SchemaOrRef> = IndexMap::new();
    let mut required: Vec<String> = Vec::new();
    for param in params {
        let key = property_name(param);
        let mut schema = param.schema.clone();
        if let SchemaOrRef::Schema(inner) = &mut schema {
            if inner.description.is_none() {
                inner.description = param.description.clone();
            }
        }
        required.retain(|r| r != &key);
        if param.required {
            required.push(key.clone());
        }
        properties.insert(key, schema);
    }
    Schema::object(properties, required)
}

impl RouteParams {
    /// Object schema for one bucket, `None` when the bucket is empty.
    pub fn object_schema(&self, location: &ParameterLocation) -> Option<Schema> {
        let bucket = self.bucket(location);
        if bucket.is_empty() {
            return None;
        }
        Some(object_schema(bucket))
    }
}
