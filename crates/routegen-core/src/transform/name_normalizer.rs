use heck::{ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

use crate::ir::NormalizedName;

/// Every casing variant of `name`, computed from its alphanumeric words.
pub fn normalize_name(name: &str) -> NormalizedName {
    let words = identifier_words(name);
    NormalizedName {
        original: name.to_string(),
        pascal_case: words.to_pascal_case(),
        camel_case: words.to_lower_camel_case(),
        snake_case: words.to_snake_case(),
        screaming_snake: words.to_shouty_snake_case(),
    }
}

/// Lower camel case form of `name`, e.g. `pet-id` → `petId`.
pub fn camel_case(name: &str) -> String {
    normalize_name(name).camel_case
}

/// Alphanumeric runs of `name` joined by `_`; `unnamed` when none exist.
fn identifier_words(name: &str) -> String {
    let words: Vec<&str> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        "unnamed".to_string()
    } else {
        words.join("_")
    }
}

fn is_path_token(segment: &str) -> bool {
    (segment.starts_with('{') && segment.ends_with('}')) || segment.starts_with(':')
}

/// Verb for a method; `GET` splits on whether a single item is addressed.
fn verb(method: &str, single: bool) -> Option<&'static str> {
    let verb = match method.to_ascii_uppercase().as_str() {
        "GET" if single => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        "HEAD" => "head",
        "TRACE" => "trace",
        _ => return None,
    };
    Some(verb)
}

/// Route name derived from method and path.
///
/// The verb comes from the method, the rest from the literal path segments.
/// A path ending in a parameter addresses one item, so its last literal
/// segment is singularized:
///
/// - `GET /users` → `listUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}/messages` → `listUsersMessages`
pub fn route_to_name(method: &str, path: &str) -> String {
    let path = path.split("{?").next().unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let single = segments.last().is_some_and(|s| is_path_token(s));

    let Some(verb) = verb(method, single) else {
        return method.to_lower_camel_case();
    };

    let literals: Vec<&str> = segments.into_iter().filter(|s| !is_path_token(s)).collect();
    let last = literals.len().saturating_sub(1);
    let resource: String = literals
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let word = if single && i == last {
                singularize(segment)
            } else {
                segment.to_string()
            };
            identifier_words(&word).to_pascal_case()
        })
        .collect();

    format!("{verb}{resource}")
}

/// English plural stripping, good enough for resource names.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        return format!("{stem}y");
    }
    for suffix in ["ses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}
