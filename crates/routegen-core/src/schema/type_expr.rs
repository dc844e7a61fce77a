use crate::ir::IrType;

use super::UNKNOWN;

/// Render an `IrType` as a TypeScript type expression.
pub fn render(ir_type: &IrType) -> String {
    match ir_type {
        IrType::String => "string".to_string(),
        IrType::StringLiteral(s) => format!("\"{}\"", escape(s)),
        IrType::Literal(s) => s.clone(),
        IrType::Number => "number".to_string(),
        IrType::Integer => "number".to_string(),
        IrType::Boolean => "boolean".to_string(),
        IrType::Null => "null".to_string(),
        IrType::DateTime => "string".to_string(),
        IrType::Binary => "File".to_string(),
        IrType::Any => UNKNOWN.to_string(),
        IrType::Ref(name) => name.clone(),
        IrType::Array(inner) => {
            let inner_ts = render(inner);
            if needs_parens(inner) {
                format!("({inner_ts})[]")
            } else {
                format!("{inner_ts}[]")
            }
        }
        IrType::Map(value_type) => {
            let value_ts = render(value_type);
            format!("Record<string, {value_ts}>")
        }
        IrType::Object(fields) => {
            if fields.is_empty() {
                return format!("Record<string, {UNKNOWN}>");
            }
            let field_strs: Vec<String> = fields
                .iter()
                .map(|(name, ty, required)| {
                    let key = property_key(name);
                    let ts_type = render(ty);
                    if *required {
                        format!("{key}: {ts_type}")
                    } else {
                        format!("{key}?: {ts_type}")
                    }
                })
                .collect();
            format!("{{ {} }}", field_strs.join("; "))
        }
        IrType::Union(variants) => join_unique(variants.iter().map(render), " | "),
        IrType::Intersection(parts) => join_unique(
            parts.iter().map(|part| {
                let ts = render(part);
                if matches!(part, IrType::Union(_)) {
                    format!("({ts})")
                } else {
                    ts
                }
            }),
            " & ",
        ),
    }
}

/// Join rendered variants, dropping repeats but keeping first-seen order.
pub fn join_unique(items: impl IntoIterator<Item = String>, separator: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen.join(separator)
}

/// Whether `name` can be used as an unquoted property key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape(name))
    }
}

pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn needs_parens(inner: &IrType) -> bool {
    match inner {
        IrType::Union(variants) => variants.len() > 1,
        IrType::Intersection(parts) => parts.len() > 1,
        _ => false,
    }
}
