use crate::ir::ContentKind;
use crate::parse::media_type::Content;

/// Media type without parameters, lowercased (`Application/JSON; charset=utf-8`
/// → `application/json`).
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl ContentKind {
    /// Classify a set of media types. JSON outranks URL-encoded, which
    /// outranks form data, then images; anything else is `Other`.
    pub fn classify<S: AsRef<str>>(content_types: &[S]) -> ContentKind {
        let essences: Vec<String> = content_types
            .iter()
            .map(|c| essence(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        if essences
            .iter()
            .any(|c| c == "application/json" || c.ends_with("+json"))
        {
            return ContentKind::Json;
        }
        if essences
            .iter()
            .any(|c| c == "application/x-www-form-urlencoded")
        {
            return ContentKind::UrlEncoded;
        }
        if essences.iter().any(|c| c == "multipart/form-data") {
            return ContentKind::FormData;
        }
        if essences.iter().any(|c| c.contains("image/")) {
            return ContentKind::Image;
        }
        ContentKind::Other
    }
}

/// Explicit media types followed by the keys of each content map,
/// deduplicated in first-seen order with empty entries dropped.
pub fn content_types<'c>(
    explicit: &[String],
    contents: impl IntoIterator<Item = &'c Content>,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let declared = contents.into_iter().flat_map(|content| content.keys());
    for media_type in explicit.iter().chain(declared) {
        let media_type = media_type.trim();
        if media_type.is_empty() || out.iter().any(|m| m == media_type) {
            continue;
        }
        out.push(media_type.to_string());
    }
    out
}
