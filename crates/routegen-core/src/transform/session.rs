use log::info;

use crate::error::TransformError;
use crate::ir::{IrInfo, IrSpec};
use crate::parse::spec::OpenApiSpec;
use crate::schema::{ComponentRegistry, DefaultSchemaResolver, SchemaResolver};

use super::TransformOptions;
use super::assemble::{Assembler, RawOperation};
use super::grouping::group_routes;
use super::hooks::{NoopHooks, RouteHooks};
use super::route_name::RouteNameResolver;
use super::template::RouteNameRenderer;

/// One route-building run over one document.
///
/// The component registry and the route-name counters are created when the
/// run starts and dropped with it, so two sessions over the same document
/// produce the same names.
pub struct GenerationSession<'s> {
    spec: &'s OpenApiSpec,
    options: TransformOptions,
    resolver: Box<dyn SchemaResolver + 's>,
    hooks: Box<dyn RouteHooks + 's>,
    renderer: RouteNameRenderer,
}

impl<'s> GenerationSession<'s> {
    /// Fails when the configured route name template does not compile.
    pub fn new(spec: &'s OpenApiSpec, options: TransformOptions) -> Result<Self, TransformError> {
        let renderer = match &options.route_name_template {
            Some(source) => RouteNameRenderer::new(source.clone())?,
            None => RouteNameRenderer::default(),
        };
        let resolver = DefaultSchemaResolver::new(spec)
            .with_affixes(options.type_prefix.clone(), options.type_suffix.clone());
        Ok(Self {
            spec,
            options,
            resolver: Box::new(resolver),
            hooks: Box::new(NoopHooks),
            renderer,
        })
    }

    pub fn with_hooks(mut self, hooks: impl RouteHooks + 's) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_resolver(mut self, resolver: impl SchemaResolver + 's) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Build every route in document order, then group them into modules.
    pub fn run(self) -> Result<IrSpec, TransformError> {
        let spec = self.spec;
        let resolver = self.resolver.as_ref();
        let mut registry = ComponentRegistry::from_spec(spec, resolver);
        let mut names = RouteNameResolver::new();

        let assembler = Assembler {
            resolver,
            hooks: self.hooks.as_ref(),
            options: &self.options,
            renderer: &self.renderer,
            global_security: spec.has_global_security(),
        };

        let mut routes = Vec::new();
        for (path, item) in &spec.paths {
            for (method, operation) in &item.operations {
                let raw_op = RawOperation {
                    path,
                    item,
                    method: *method,
                    operation,
                };
                if let Some(route) = assembler.build_route(&mut registry, &mut names, raw_op)? {
                    routes.push(route);
                }
            }
        }

        let groups = group_routes(&mut routes, &self.options.modules);
        let components = registry.into_components();
        info!(
            "built {} routes in {} modules, {} components extracted",
            routes.len(),
            groups.modules.len(),
            components.len()
        );

        Ok(IrSpec {
            info: IrInfo {
                title: spec.info.title.clone(),
                description: spec.info.description.clone(),
                version: spec.info.version.clone(),
            },
            routes,
            modules: groups.modules,
            out_of_module: groups.out_of_module,
            components,
        })
    }
}
