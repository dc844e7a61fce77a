use log::debug;

use crate::error::{NameResolveError, TransformError};
use crate::ir::{
    ContentKind, HttpMethod, PathArg, RawRouteInfo, RequestBodyInfo, RequestParamsInfo, Route,
    RouteId, RouteParams, SpecificArg, SpecificArgs,
};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::request_body::{RequestBody, RequestBodyOrRef};
use crate::parse::schema::SchemaOrRef;
use crate::schema::{ComponentCategory, ComponentRegistry, RefTarget, SchemaResolver};

use super::TransformOptions;
use super::arg_names::{
    ArgNameResolver, BODY_ARG_NAMES, HEADERS_ARG_NAMES, PATH_PARAMS_ARG_NAMES, QUERY_ARG_NAMES,
};
use super::body::{BodyNode, resolve_body_type};
use super::content::content_types;
use super::extract::{
    candidates, extract_request_body, extract_response_body, extract_response_error,
    request_params_schema,
};
use super::grouping::namespace_for;
use super::hooks::RouteHooks;
use super::name_normalizer::route_to_name;
use super::params::{classify_parameters, object_schema};
use super::path_template::parse_path_template;
use super::responses::aggregate_responses;
use super::route_name::RouteNameResolver;
use super::template::{RouteNameContext, RouteNameRenderer};

const DEFAULT_BODY_ARG: &str = "data";

/// One HTTP-method entry under one path, as declared.
#[derive(Debug, Clone, Copy)]
pub struct RawOperation<'a> {
    pub path: &'a str,
    pub item: &'a PathItem,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

/// Read-only collaborators shared by every route of a run.
pub(crate) struct Assembler<'a> {
    pub resolver: &'a dyn SchemaResolver,
    pub hooks: &'a dyn RouteHooks,
    pub options: &'a TransformOptions,
    pub renderer: &'a RouteNameRenderer,
    pub global_security: bool,
}

impl Assembler<'_> {
    /// Build the route for one operation. `Ok(None)` when the
    /// `create_route` hook drops it.
    pub fn build_route(
        &self,
        registry: &mut ComponentRegistry,
        names: &mut RouteNameResolver,
        raw_op: RawOperation<'_>,
    ) -> Result<Option<Route>, TransformError> {
        let op = raw_op.operation;
        let resolver = self.resolver;

        let path = self.hooks.pre_build_route_path(raw_op.path);
        let template = parse_path_template(&path);

        let declared: Vec<&ParameterOrRef> =
            raw_op.item.parameters.iter().chain(&op.parameters).collect();
        let route_params = classify_parameters(&declared, &template, resolver);

        let namespace = namespace_for(&path, &op.tags, &self.options.modules);
        let raw = RawRouteInfo {
            operation_id: op.operation_id.clone(),
            original_route: raw_op.path.to_string(),
            module_name: namespace.clone(),
            tags: op.tags.clone(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated.unwrap_or(false),
        };

        let path_args: Vec<PathArg> = route_params
            .path
            .iter()
            .map(|param| PathArg {
                name: param.name.clone(),
                optional: !param.required,
                type_expr: resolver.inline_type_expression(&param.schema),
                description: param.description.clone(),
            })
            .collect();

        let route_based_name = route_to_name(raw_op.method.as_str(), &path);
        let context = RouteNameContext {
            operation_id: op.operation_id.as_deref(),
            method: raw_op.method.as_key(),
            path: &path,
            module_name: namespace.as_deref(),
            tags: &op.tags,
            summary: op.summary.as_deref(),
            description: op.description.as_deref(),
            path_args: path_args.iter().map(|a| a.name.as_str()).collect(),
            strategy: self.options.naming_strategy,
            route_based_name: &route_based_name,
        };
        let rendered = self.renderer.render(&context)?;
        let aliased = self
            .options
            .aliases
            .get(&rendered)
            .cloned()
            .unwrap_or(rendered);
        let name = self.hooks.format_route_name(&raw, aliased);
        let route_name = names.resolve(namespace.as_deref(), &name);
        debug!(
            "{} {} -> {}",
            raw_op.method.as_str(),
            raw_op.path,
            route_name.usage
        );

        let extract = &self.options.extract;
        let mut request_body = self.request_body_info(registry, op, &route_params);
        if extract.request_body {
            extract_request_body(
                registry,
                resolver,
                &mut request_body,
                &route_name.usage,
                extract,
            );
        }

        let mut response_body = aggregate_responses(
            resolver,
            registry.parsed_schemas(),
            op,
            &self.options.responses,
        );
        if extract.response_body {
            extract_response_body(
                registry,
                resolver,
                &mut response_body,
                &route_name.usage,
                extract,
            );
        }
        if extract.response_error {
            extract_response_error(
                registry,
                resolver,
                &mut response_body,
                &route_name.usage,
                extract,
            );
        }

        let request_params = request_params_schema(&route_params).map(|schema| {
            let schema = self.hooks.create_request_params(&route_params, schema);
            if extract.request_params {
                let component = registry.create_component(
                    resolver,
                    ComponentCategory::Schemas,
                    &candidates(&route_name.usage, &extract.request_params_suffixes),
                    schema.into(),
                );
                RequestParamsInfo {
                    schema: SchemaOrRef::reference(component.ref_path),
                    type_expr: component.type_name,
                }
            } else {
                let schema = SchemaOrRef::from(schema);
                RequestParamsInfo {
                    type_expr: resolver.inline_type_expression(&schema),
                    schema,
                }
            }
        });

        let specific_args = self
            .specific_args(&route_params, &path_args, &mut request_body)
            .map_err(|source| TransformError::ArgName {
                route: format!("{} {}", raw_op.method.as_str(), raw_op.path),
                source,
            })?;

        let security = match &op.security {
            Some(requirements) => !requirements.is_empty(),
            None => self.global_security,
        };

        let route = Route {
            id: RouteId::next(),
            namespace,
            route_name,
            method: raw_op.method,
            path: template.route,
            route_params,
            path_args,
            request_body,
            request_params,
            response_body,
            specific_args,
            security,
            raw,
        };
        Ok(self.hooks.create_route(route))
    }

    fn inline_request_body(&self, entry: &RequestBodyOrRef) -> Option<RequestBody> {
        match entry {
            RequestBodyOrRef::RequestBody(body) => Some(body.clone()),
            RequestBodyOrRef::Ref { ref_path } => {
                match self.resolver.resolve_reference(ref_path)?.target {
                    RefTarget::RequestBody(body) => Some(body),
                    _ => None,
                }
            }
        }
    }

    fn request_body_info(
        &self,
        registry: &ComponentRegistry,
        op: &Operation,
        route_params: &RouteParams,
    ) -> RequestBodyInfo {
        let resolver = self.resolver;
        let declared = op.request_body.as_ref();
        let inline = declared.and_then(|entry| self.inline_request_body(entry));

        let name = op
            .request_body_name
            .clone()
            .or_else(|| inline.as_ref().and_then(|body| body.name.clone()))
            .unwrap_or_else(|| DEFAULT_BODY_ARG.to_string());
        let explicit = op
            .content_type
            .as_ref()
            .map(|types| types.to_vec())
            .unwrap_or_default();
        let content_types = content_types(&explicit, inline.iter().map(|body| &body.content));
        let description = inline
            .as_ref()
            .and_then(|body| body.description.as_deref())
            .map(|text| resolver.format_description(text, false));

        if !route_params.form_data.is_empty() {
            let schema = SchemaOrRef::from(object_schema(&route_params.form_data));
            return RequestBodyInfo {
                name,
                content_types,
                content_kind: ContentKind::FormData,
                type_expr: Some(resolver.inline_type_expression(&schema)),
                schema: Some(schema),
                required: route_params.form_data.iter().any(|p| p.required),
                description,
            };
        }

        let (schema, type_expr) = match declared {
            Some(entry) => {
                let body = resolve_body_type(
                    resolver,
                    registry.parsed_schemas(),
                    BodyNode::Request(entry),
                    op.operation_id.as_deref(),
                    None,
                );
                let type_expr = resolver.decorate_nullable(body.nullable, body.type_expr);
                (body.schema, Some(type_expr))
            }
            None => (None, None),
        };

        let mut content_kind = ContentKind::classify(&content_types);
        if content_kind == ContentKind::Json
            && type_expr
                .as_deref()
                .is_some_and(|ty| ty.contains(": File") || ty.contains(": Blob"))
        {
            content_kind = ContentKind::FormData;
        }

        RequestBodyInfo {
            name,
            content_types,
            content_kind,
            schema,
            type_expr,
            required: declared.is_some()
                && inline.as_ref().and_then(|body| body.required) != Some(false),
            description,
        }
    }

    fn bucket_arg(
        &self,
        route_params: &RouteParams,
        location: &ParameterLocation,
        names: &mut ArgNameResolver,
        candidates: &[&str],
    ) -> Result<Option<SpecificArg>, NameResolveError> {
        let Some(schema) = route_params.object_schema(location) else {
            return Ok(None);
        };
        let schema = SchemaOrRef::from(schema);
        let shape = self.resolver.schema_shape(&schema);
        Ok(Some(SpecificArg {
            name: names.resolve(candidates)?,
            optional: shape.all_fields_optional,
            type_expr: self.resolver.inline_type_expression(&schema),
        }))
    }

    fn specific_args(
        &self,
        route_params: &RouteParams,
        path_args: &[PathArg],
        request_body: &mut RequestBodyInfo,
    ) -> Result<SpecificArgs, NameResolveError> {
        let mut names = ArgNameResolver::new(path_args.iter().map(|arg| arg.name.clone()));

        let query = self.bucket_arg(
            route_params,
            &ParameterLocation::Query,
            &mut names,
            &QUERY_ARG_NAMES,
        )?;

        let body = match &request_body.type_expr {
            Some(type_expr) => {
                let mut body_candidates = vec![request_body.name.as_str()];
                body_candidates.extend(BODY_ARG_NAMES);
                let name = names.resolve(&body_candidates)?;
                let arg = SpecificArg {
                    name: name.clone(),
                    optional: !request_body.required,
                    type_expr: type_expr.clone(),
                };
                request_body.name = name;
                Some(arg)
            }
            None => None,
        };

        let path_params = self.bucket_arg(
            route_params,
            &ParameterLocation::Path,
            &mut names,
            &PATH_PARAMS_ARG_NAMES,
        )?;
        let headers = self.bucket_arg(
            route_params,
            &ParameterLocation::Header,
            &mut names,
            &HEADERS_ARG_NAMES,
        )?;

        Ok(SpecificArgs {
            query,
            body,
            path_params,
            headers,
        })
    }
}
