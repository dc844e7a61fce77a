use serde_json::Value;

use crate::ir::IrType;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

/// Builds `IrType` trees from parsed schemas. `$ref`s become `IrType::Ref`
/// carrying the name produced by `type_name`; nothing is dereferenced, so
/// recursive schemas terminate.
pub struct TypeBuilder<'f> {
    type_name: &'f dyn Fn(&str) -> String,
}

impl<'f> TypeBuilder<'f> {
    pub fn new(type_name: &'f dyn Fn(&str) -> String) -> Self {
        Self { type_name }
    }

    pub fn schema_or_ref(&self, schema_or_ref: &SchemaOrRef) -> IrType {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                let name = ref_path.rsplit('/').next().unwrap_or("Unknown");
                IrType::Ref((self.type_name)(name))
            }
            SchemaOrRef::Schema(schema) => self.schema(schema),
        }
    }

    pub fn schema(&self, schema: &Schema) -> IrType {
        let base = self.schema_without_nullable(schema);
        if schema.nullable == Some(true) {
            with_null(base)
        } else {
            base
        }
    }

    fn schema_without_nullable(&self, schema: &Schema) -> IrType {
        // Handle composition first
        if !schema.one_of.is_empty() {
            return IrType::Union(schema.one_of.iter().map(|s| self.schema_or_ref(s)).collect());
        }
        if !schema.any_of.is_empty() {
            return IrType::Union(schema.any_of.iter().map(|s| self.schema_or_ref(s)).collect());
        }
        if !schema.all_of.is_empty() {
            return self.all_of(schema);
        }

        if !schema.enum_values.is_empty() {
            let variants: Vec<IrType> = schema.enum_values.iter().filter_map(literal).collect();
            return match variants.len() {
                0 => IrType::String,
                1 => variants.into_iter().next().unwrap_or(IrType::String),
                _ => IrType::Union(variants),
            };
        }

        if let Some(value) = &schema.const_value {
            return literal(value).unwrap_or(IrType::String);
        }

        match &schema.schema_type {
            Some(TypeSet::Single(t)) => self.single_type(t, schema),
            Some(TypeSet::Multiple(types)) => {
                let non_null: Vec<&SchemaType> =
                    types.iter().filter(|t| **t != SchemaType::Null).collect();
                let has_null = types.contains(&SchemaType::Null);
                let mut variants: Vec<IrType> = non_null
                    .iter()
                    .map(|t| self.single_type(t, schema))
                    .collect();
                if has_null {
                    variants.push(IrType::Null);
                }
                match variants.len() {
                    0 => IrType::Any,
                    1 => variants.into_iter().next().unwrap_or(IrType::Any),
                    _ => IrType::Union(variants),
                }
            }
            None => {
                // No type specified; infer from shape
                if !schema.properties.is_empty() || schema.additional_properties.is_some() {
                    self.object(schema)
                } else if let Some(items) = &schema.items {
                    IrType::Array(Box::new(self.schema_or_ref(items)))
                } else {
                    IrType::Any
                }
            }
        }
    }

    fn single_type(&self, t: &SchemaType, schema: &Schema) -> IrType {
        match t {
            SchemaType::String => match schema.format.as_deref() {
                Some("date-time" | "date") => IrType::DateTime,
                Some("binary") => IrType::Binary,
                _ => IrType::String,
            },
            SchemaType::Number => IrType::Number,
            SchemaType::Integer => IrType::Integer,
            SchemaType::Boolean => IrType::Boolean,
            SchemaType::Null => IrType::Null,
            SchemaType::Array => match &schema.items {
                Some(items) => IrType::Array(Box::new(self.schema_or_ref(items))),
                None => IrType::Array(Box::new(IrType::Any)),
            },
            SchemaType::Object => self.object(schema),
            SchemaType::File => IrType::Binary,
        }
    }

    fn object(&self, schema: &Schema) -> IrType {
        if schema.properties.is_empty() {
            return match &schema.additional_properties {
                Some(AdditionalProperties::Schema(s)) => {
                    IrType::Map(Box::new(self.schema_or_ref(s)))
                }
                Some(AdditionalProperties::Bool(true)) => IrType::Map(Box::new(IrType::Any)),
                Some(AdditionalProperties::Bool(false)) | None => IrType::Object(Vec::new()),
            };
        }
        IrType::Object(self.fields(schema))
    }

    fn fields(&self, schema: &Schema) -> Vec<(String, IrType, bool)> {
        schema
            .properties
            .iter()
            .map(|(name, prop)| {
                (
                    name.clone(),
                    self.schema_or_ref(prop),
                    schema.required.contains(name),
                )
            })
            .collect()
    }

    fn all_of(&self, schema: &Schema) -> IrType {
        let mut parts: Vec<IrType> = schema
            .all_of
            .iter()
            .map(|sub| match sub {
                SchemaOrRef::Ref { .. } => self.schema_or_ref(sub),
                SchemaOrRef::Schema(s) if s.properties.is_empty() => self.schema(s),
                SchemaOrRef::Schema(s) => IrType::Object(self.fields(s)),
            })
            .collect();
        if !schema.properties.is_empty() {
            parts.push(IrType::Object(self.fields(schema)));
        }
        if parts.len() == 1 {
            return parts.into_iter().next().unwrap_or(IrType::Any);
        }
        IrType::Intersection(parts)
    }
}

fn literal(value: &Value) -> Option<IrType> {
    match value {
        Value::String(s) => Some(IrType::StringLiteral(s.clone())),
        Value::Number(n) => Some(IrType::Literal(n.to_string())),
        Value::Bool(b) => Some(IrType::Literal(b.to_string())),
        Value::Null => Some(IrType::Null),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn with_null(base: IrType) -> IrType {
    match base {
        IrType::Null => IrType::Null,
        IrType::Union(mut variants) => {
            if !variants.contains(&IrType::Null) {
                variants.push(IrType::Null);
            }
            IrType::Union(variants)
        }
        other => IrType::Union(vec![other, IrType::Null]),
    }
}
