use crate::error::NameResolveError;

pub const QUERY_ARG_NAMES: [&str; 3] = ["query", "queryParams", "queryArg"];
pub const BODY_ARG_NAMES: [&str; 3] = ["data", "body", "reqBody"];
pub const PATH_PARAMS_ARG_NAMES: [&str; 2] = ["path", "pathParams"];
pub const HEADERS_ARG_NAMES: [&str; 2] = ["headers", "headersParams"];

/// Picks argument names for one operation that do not collide with its path
/// arguments or with each other.
#[derive(Debug, Clone)]
pub struct ArgNameResolver {
    reserved: Vec<String>,
}

impl ArgNameResolver {
    pub fn new<I, S>(path_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: path_args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    /// First free candidate, which is then reserved.
    pub fn resolve<S: AsRef<str>>(&mut self, candidates: &[S]) -> Result<String, NameResolveError> {
        let mut unique: Vec<&str> = Vec::with_capacity(candidates.len());
        for candidate in candidates.iter().map(AsRef::as_ref) {
            if !candidate.is_empty() && !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }

        match unique
            .iter()
            .find(|c| !self.reserved.iter().any(|r| r == *c))
        {
            Some(name) => {
                self.reserved.push(name.to_string());
                Ok(name.to_string())
            }
            None => Err(NameResolveError::Exhausted {
                candidates: unique.iter().map(|c| c.to_string()).collect(),
                reserved: self.reserved.clone(),
            }),
        }
    }
}
