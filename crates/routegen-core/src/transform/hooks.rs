use crate::ir::{RawRouteInfo, Route, RouteParams};
use crate::parse::schema::Schema;

/// Extension points of route building. Every method defaults to a no-op.
pub trait RouteHooks {
    /// Rewrite the literal path before its template is parsed.
    fn pre_build_route_path(&self, path: &str) -> String {
        path.to_string()
    }

    /// Rename a route after templating and alias lookup.
    fn format_route_name(&self, _raw: &RawRouteInfo, name: String) -> String {
        name
    }

    /// Replace the merged query+path params schema.
    fn create_request_params(&self, _params: &RouteParams, schema: Schema) -> Schema {
        schema
    }

    /// Replace or drop (`None`) a fully assembled route.
    fn create_route(&self, route: Route) -> Option<Route> {
        Some(route)
    }
}

/// Hooks that change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl RouteHooks for NoopHooks {}
