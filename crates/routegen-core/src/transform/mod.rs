pub mod arg_names;
pub mod assemble;
pub mod body;
pub mod content;
pub mod extract;
pub mod grouping;
pub mod hooks;
pub mod name_normalizer;
pub mod params;
pub mod path_template;
pub mod responses;
pub mod route_name;
pub mod session;
pub mod template;

use indexmap::IndexMap;

use crate::config::{NamingStrategy, RoutegenConfig};
use crate::error::TransformError;
use crate::ir::IrSpec;
use crate::parse::spec::OpenApiSpec;

pub use extract::ExtractOptions;
pub use grouping::ModuleOptions;
pub use hooks::{NoopHooks, RouteHooks};
pub use responses::ResponseRules;
pub use session::GenerationSession;

/// Options controlling how routes are named, grouped, typed and extracted.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub naming_strategy: NamingStrategy,
    /// Route name → replacement, applied after templating.
    pub aliases: IndexMap<String, String>,
    /// Overrides the built-in route name template.
    pub route_name_template: Option<String>,
    pub modules: ModuleOptions,
    pub responses: ResponseRules,
    pub extract: ExtractOptions,
    pub type_prefix: String,
    pub type_suffix: String,
}

impl TransformOptions {
    pub fn from_config(config: &RoutegenConfig) -> Self {
        let extract = &config.extract;
        Self {
            naming_strategy: config.naming.strategy,
            aliases: config.naming.aliases.clone(),
            route_name_template: config.naming.route_name_template.clone(),
            modules: ModuleOptions {
                first_tag: config.modules.first_tag,
                path_index: config.modules.path_index,
                sort_routes: config.modules.sort_routes,
            },
            responses: ResponseRules {
                default_as_success: config.responses.default_as_success,
                success_range: (
                    config.responses.success_range[0],
                    config.responses.success_range[1],
                ),
                default_response_type: config.responses.default_response_type.clone(),
            },
            extract: ExtractOptions {
                request_body: extract.request_body,
                request_params: extract.request_params,
                response_body: extract.response_body,
                response_error: extract.response_error,
                request_body_suffixes: extract.request_body_suffixes.clone(),
                request_params_suffixes: extract.request_params_suffixes.clone(),
                response_body_suffixes: extract.response_body_suffixes.clone(),
                response_error_suffixes: extract.response_error_suffixes.clone(),
            },
            type_prefix: config.types.prefix.clone(),
            type_suffix: config.types.suffix.clone(),
        }
    }
}

/// Build the route IR with default options.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Build the route IR with explicit options and no hooks.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    GenerationSession::new(spec, options.clone())?.run()
}
