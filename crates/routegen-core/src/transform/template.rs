use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use minijinja::{Environment, Value};
use serde::Serialize;

use crate::config::NamingStrategy;

/// Built-in route name template: the operation id when the strategy allows
/// it and one is declared, the method+path derived name otherwise.
pub const DEFAULT_ROUTE_NAME_TEMPLATE: &str = "{% if strategy == \"use_operation_id\" and operation_id %}{{ operation_id | camel_case }}{% else %}{{ route_based_name }}{% endif %}";

/// Values visible to the route name template.
#[derive(Debug, Clone, Serialize)]
pub struct RouteNameContext<'a> {
    pub operation_id: Option<&'a str>,
    pub method: &'a str,
    pub path: &'a str,
    pub module_name: Option<&'a str>,
    pub tags: &'a [String],
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub path_args: Vec<&'a str>,
    pub strategy: NamingStrategy,
    pub route_based_name: &'a str,
}

/// Filter input as text; `none` and undefined render as nothing.
fn text(value: &Value) -> String {
    if value.is_none() || value.is_undefined() {
        return String::new();
    }
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn camel_case(value: &Value) -> String {
    text(value).to_lower_camel_case()
}

fn pascal_case(value: &Value) -> String {
    text(value).to_pascal_case()
}

fn snake_case(value: &Value) -> String {
    text(value).to_snake_case()
}

/// Renders route names from a minijinja template.
pub struct RouteNameRenderer {
    env: Environment<'static>,
    source: String,
}

impl std::fmt::Debug for RouteNameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteNameRenderer")
            .field("source", &self.source)
            .finish()
    }
}

impl Default for RouteNameRenderer {
    fn default() -> Self {
        Self {
            env: environment(),
            source: DEFAULT_ROUTE_NAME_TEMPLATE.to_string(),
        }
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("camel_case", camel_case);
    env.add_filter("pascal_case", pascal_case);
    env.add_filter("snake_case", snake_case);
    env
}

impl RouteNameRenderer {
    /// Compile `source` once so syntax errors surface before any route is
    /// built.
    pub fn new(source: impl Into<String>) -> Result<Self, minijinja::Error> {
        let env = environment();
        let source = source.into();
        env.template_from_str(&source)?;
        Ok(Self { env, source })
    }

    pub fn render(&self, context: &RouteNameContext<'_>) -> Result<String, minijinja::Error> {
        let rendered = self
            .env
            .render_str(&self.source, Value::from_serialize(context))?;
        Ok(rendered.trim().to_string())
    }
}
