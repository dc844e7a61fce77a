use std::sync::OnceLock;

use log::warn;
use regex::{Captures, Regex};

use crate::parse::parameter::ParameterLocation;

use super::name_normalizer::camel_case;

/// A parameter implied by the path string itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParameter {
    /// Matched text, e.g. `{pet-id}` or `:id:`.
    pub token: String,
    /// Lower camel case name.
    pub name: String,
    pub location: ParameterLocation,
}

/// Result of parsing a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    pub original_route: String,
    /// Path with every token replaced by `${name}` and query expansions removed.
    pub route: String,
    pub path_params: Vec<PathParameter>,
    /// Names from `{?a,b}` expansions.
    pub query_params: Vec<PathParameter>,
}

fn path_param_re() -> &'static Regex {
    static PATH_PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PATH_PARAM_RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_.\-]*)\}|:([A-Za-z_][A-Za-z0-9_.\-]*):?")
            .expect("Invalid regex constant")
    })
}

fn query_template_re() -> &'static Regex {
    static QUERY_TEMPLATE_RE: OnceLock<Regex> = OnceLock::new();
    QUERY_TEMPLATE_RE.get_or_init(|| Regex::new(r"\{\?([^}]*)\}").expect("Invalid regex constant"))
}

/// Extract implicit parameters from `path` and rewrite it with `${name}`
/// placeholders. Never fails; a path without tokens comes back unchanged.
pub fn parse_path_template(path: &str) -> PathTemplate {
    let mut path_params = Vec::new();

    let rewritten = path_param_re().replace_all(path, |caps: &Captures| {
        let token = caps[0].to_string();
        let raw = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if raw.is_empty() {
            return token;
        }
        if raw.contains('-') {
            warn!("path parameter '{raw}' in {path} contains '-', using '{}'", camel_case(raw));
        }
        let name = camel_case(raw);
        let placeholder = format!("${{{name}}}");
        path_params.push(PathParameter {
            token,
            name,
            location: ParameterLocation::Path,
        });
        placeholder
    });

    let mut query_params: Vec<PathParameter> = Vec::new();
    for caps in query_template_re().captures_iter(&rewritten) {
        for raw in caps[1].split(',') {
            let raw = raw.trim().trim_end_matches('*');
            if raw.is_empty() {
                continue;
            }
            if raw.contains('-') {
                warn!("query parameter '{raw}' in {path} contains '-', using '{}'", camel_case(raw));
            }
            let name = camel_case(raw);
            if query_params.iter().any(|p| p.name == name) {
                continue;
            }
            query_params.push(PathParameter {
                token: raw.to_string(),
                name,
                location: ParameterLocation::Query,
            });
        }
    }
    let route = query_template_re().replace_all(&rewritten, "").into_owned();

    PathTemplate {
        original_route: path.to_string(),
        route,
        path_params,
        query_params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(params: &[PathParameter]) -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn brace_and_colon_tokens() {
        let braces = parse_path_template("/pets/{id}");
        assert_eq!(names(&braces.path_params), vec!["id"]);
        assert_eq!(braces.route, "/pets/${id}");

        let colon = parse_path_template("/pets/:id");
        assert_eq!(names(&colon.path_params), vec!["id"]);
        assert_eq!(colon.route, "/pets/${id}");

        let closed = parse_path_template("/pets/:id:/toys");
        assert_eq!(closed.route, "/pets/${id}/toys");
        assert_eq!(closed.path_params[0].token, ":id:");
    }

    #[test]
    fn hyphenated_names_are_normalized() {
        let t = parse_path_template("/stores/{store-id}/items/{item_id}");
        assert_eq!(names(&t.path_params), vec!["storeId", "itemId"]);
        assert_eq!(t.route, "/stores/${storeId}/items/${itemId}");
        assert!(t.path_params.iter().all(|p| p.location == ParameterLocation::Path));
    }

    #[test]
    fn query_expansion_is_extracted() {
        let t = parse_path_template("/search/{kind}{?q,page-size,q}");
        assert_eq!(names(&t.path_params), vec!["kind"]);
        assert_eq!(names(&t.query_params), vec!["q", "pageSize"]);
        assert_eq!(t.route, "/search/${kind}");
        assert_eq!(t.original_route, "/search/{kind}{?q,page-size,q}");
    }

    #[test]
    fn plain_and_empty_paths_are_unchanged() {
        let t = parse_path_template("/health");
        assert!(t.path_params.is_empty());
        assert_eq!(t.route, t.original_route);

        let empty = parse_path_template("");
        assert!(empty.path_params.is_empty());
        assert_eq!(empty.route, "");
    }
}
