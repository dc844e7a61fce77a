use indexmap::IndexMap;
use log::warn;

use crate::ir::RouteName;

/// Hands out unique route names per module.
///
/// The first route to claim a name keeps it; later ones get the occurrence
/// count appended (`getUser`, `getUser2`, `getUser3`).
#[derive(Debug, Default)]
pub struct RouteNameResolver {
    counts: IndexMap<String, usize>,
}

impl RouteNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, module: Option<&str>, name: &str) -> RouteName {
        let key = format!("{}|{name}", module.unwrap_or_default());
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;

        if *count == 1 {
            return RouteName {
                original: name.to_string(),
                usage: name.to_string(),
                duplicate: false,
            };
        }

        let usage = format!("{name}{count}");
        warn!(
            "route name `{name}` already used in module `{}`, renamed to `{usage}`",
            module.unwrap_or_default()
        );
        RouteName {
            original: name.to_string(),
            usage,
            duplicate: true,
        }
    }
}
