use indexmap::IndexMap;
use log::debug;

use crate::ir::{IrModule, Route};

use super::name_normalizer::camel_case;

/// How routes are assigned to modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Name the module after the first tag when the operation has one.
    pub first_tag: bool,
    /// Which non-empty path segment names the module.
    pub path_index: usize,
    /// Order routes inside each module by usage name.
    pub sort_routes: bool,
}

/// Namespace of an operation, `None` when nothing usable is found.
pub fn namespace_for(path: &str, tags: &[String], options: &ModuleOptions) -> Option<String> {
    let name = match tags.first() {
        Some(tag) if options.first_tag => camel_case(tag),
        _ => path
            .split("{?")
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .nth(options.path_index)
            .map(camel_case)
            .unwrap_or_default(),
    };
    if name.is_empty() {
        return None;
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(format!("v{name}"));
    }
    Some(name)
}

/// Grouped view of a route list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleGroups {
    pub modules: Vec<IrModule>,
    pub out_of_module: Vec<usize>,
}

/// Partition routes by namespace in first-seen order, then undo duplicate
/// suffixes that turned out to be unnecessary inside a module.
pub fn group_routes(routes: &mut [Route], options: &ModuleOptions) -> ModuleGroups {
    let mut by_namespace: IndexMap<String, Vec<usize>> = IndexMap::new();
    let mut out_of_module = Vec::new();
    for (index, route) in routes.iter().enumerate() {
        match &route.namespace {
            Some(namespace) => by_namespace.entry(namespace.clone()).or_default().push(index),
            None => out_of_module.push(index),
        }
    }

    for indices in by_namespace.values() {
        revert_unneeded_suffixes(routes, indices);
    }

    let modules = by_namespace
        .into_iter()
        .map(|(name, mut indices)| {
            if options.sort_routes {
                indices.sort_by(|&a, &b| {
                    routes[a]
                        .route_name
                        .usage
                        .cmp(&routes[b].route_name.usage)
                });
            }
            IrModule {
                name,
                routes: indices,
            }
        })
        .collect();

    ModuleGroups {
        modules,
        out_of_module,
    }
}

/// A renamed route whose original name no other route of the module carries
/// gets its original name back. The duplicate flag is left as assigned.
fn revert_unneeded_suffixes(routes: &mut [Route], indices: &[usize]) {
    if indices.len() <= 1 {
        return;
    }
    for &index in indices {
        let name = &routes[index].route_name;
        if name.usage == name.original {
            continue;
        }
        let shared = indices
            .iter()
            .any(|&other| other != index && routes[other].route_name.original == name.original);
        if !shared {
            debug!("restoring route name {} (was {})", name.original, name.usage);
            let original = name.original.clone();
            routes[index].route_name.usage = original;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn namespace_from_path_segment() {
        let options = ModuleOptions::default();
        assert_eq!(namespace_for("/pets/{id}", &[], &options).as_deref(), Some("pets"));
        assert_eq!(namespace_for("/", &[], &options), None);
        assert_eq!(
            namespace_for("/search{?q}", &[], &options).as_deref(),
            Some("search")
        );
        assert_eq!(
            namespace_for("/2024-01/reports", &[], &options).as_deref(),
            Some("v202401")
        );
    }

    #[test]
    fn namespace_from_tag_or_index() {
        let by_tag = ModuleOptions {
            first_tag: true,
            ..ModuleOptions::default()
        };
        assert_eq!(
            namespace_for("/v1/pets", &tags(&["Pet Store", "x"]), &by_tag).as_deref(),
            Some("petStore")
        );
        assert_eq!(namespace_for("/v1/pets", &[], &by_tag).as_deref(), Some("v1"));

        let second = ModuleOptions {
            path_index: 1,
            ..ModuleOptions::default()
        };
        assert_eq!(namespace_for("/v1/pets", &[], &second).as_deref(), Some("pets"));
    }
}
