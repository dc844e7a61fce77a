use log::debug;

use crate::parse::reference::{RefLookup, split_ref};
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::spec::OpenApiSpec;
use crate::transform::name_normalizer::normalize_name;

use super::convert::TypeBuilder;
use super::type_expr::render;
use super::{ComponentCategory, RefTarget, ResolvedRef, SchemaResolver, SchemaShape};

/// Resolver backed by the document's `components` section, rendering
/// TypeScript-flavoured type expressions.
#[derive(Debug, Clone)]
pub struct DefaultSchemaResolver<'a> {
    lookup: RefLookup<'a>,
    type_prefix: String,
    type_suffix: String,
}

impl<'a> DefaultSchemaResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            lookup: RefLookup::new(spec),
            type_prefix: String::new(),
            type_suffix: String::new(),
        }
    }

    /// Prefix and suffix applied to every formatted type name.
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.type_prefix = prefix.into();
        self.type_suffix = suffix.into();
        self
    }

    fn shape_of(&self, schema: &Schema, shape: &mut SchemaShape, required: &mut Vec<String>) {
        for member in &schema.all_of {
            let resolved = match member {
                SchemaOrRef::Schema(s) => Some(s.as_ref()),
                SchemaOrRef::Ref { ref_path } => self.lookup.schema(ref_path).ok(),
            };
            if let Some(s) = resolved {
                self.shape_of(s, shape, required);
            }
        }
        if !schema.properties.is_empty() {
            shape.is_object = true;
        }
        for name in schema.properties.keys() {
            if !shape.field_names.contains(name) {
                shape.field_names.push(name.clone());
            }
        }
        required.extend(schema.required.iter().cloned());
    }
}

impl SchemaResolver for DefaultSchemaResolver<'_> {
    fn resolve_reference(&self, ref_path: &str) -> Option<ResolvedRef> {
        let (section, name) = match split_ref(ref_path) {
            Ok(parts) => parts,
            Err(err) => {
                debug!("unresolvable reference: {err}");
                return None;
            }
        };
        let category = ComponentCategory::from_section(section);
        let target = match &category {
            ComponentCategory::Schemas => {
                let schema = self.lookup.components()?.schemas.get(name)?;
                RefTarget::Schema(schema.clone())
            }
            ComponentCategory::Responses => match self.lookup.response(ref_path) {
                Ok(response) => RefTarget::Response(response.clone()),
                Err(err) => {
                    debug!("unresolvable reference: {err}");
                    return None;
                }
            },
            ComponentCategory::RequestBodies => match self.lookup.request_body(ref_path) {
                Ok(body) => RefTarget::RequestBody(body.clone()),
                Err(err) => {
                    debug!("unresolvable reference: {err}");
                    return None;
                }
            },
            ComponentCategory::Other(other) => match other.as_str() {
                "parameters" => match self.lookup.parameter(ref_path) {
                    Ok(param) => RefTarget::Parameter(param.clone()),
                    Err(err) => {
                        debug!("unresolvable reference: {err}");
                        return None;
                    }
                },
                "headers" => match self.lookup.header(ref_path) {
                    Ok(header) => RefTarget::Header(header.clone()),
                    Err(err) => {
                        debug!("unresolvable reference: {err}");
                        return None;
                    }
                },
                _ => RefTarget::Unknown,
            },
        };
        Some(ResolvedRef {
            name: name.to_string(),
            type_name: self.format_identifier(name),
            category,
            target,
        })
    }

    fn inline_type_expression(&self, schema: &SchemaOrRef) -> String {
        let type_name = |name: &str| self.format_identifier(name);
        render(&TypeBuilder::new(&type_name).schema_or_ref(schema))
    }

    fn format_identifier(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.type_prefix,
            normalize_name(name).pascal_case,
            self.type_suffix
        )
    }

    fn schema_shape(&self, schema: &SchemaOrRef) -> SchemaShape {
        let resolved = match schema {
            SchemaOrRef::Schema(s) => Some(s.as_ref()),
            SchemaOrRef::Ref { ref_path } => self.lookup.schema(ref_path).ok(),
        };
        let Some(resolved) = resolved else {
            return SchemaShape::default();
        };
        let mut shape = SchemaShape::default();
        let mut required = Vec::new();
        self.shape_of(resolved, &mut shape, &mut required);
        shape.all_fields_optional = !shape.field_names.iter().any(|f| required.contains(f));
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const DOC: &str = r##"
openapi: "3.0.3"
info:
  title: resolver
  version: "1"
paths: {}
components:
  schemas:
    pet_record:
      type: object
      required: [id]
      properties:
        id:
          type: string
        tag:
          type: string
    Extended:
      allOf:
        - $ref: "#/components/schemas/pet_record"
        - properties:
            note:
              type: string
  responses:
    NotFound:
      description: missing
  parameters:
    Limit:
      name: limit
      in: query
"##;

    #[test]
    fn formats_names_with_affixes() {
        let spec = parse::from_yaml(DOC).unwrap();
        let resolver = DefaultSchemaResolver::new(&spec).with_affixes("Api", "Dto");
        assert_eq!(resolver.format_identifier("pet_record"), "ApiPetRecordDto");
        let expr =
            resolver.inline_type_expression(&SchemaOrRef::reference("#/components/schemas/pet_record"));
        assert_eq!(expr, "ApiPetRecordDto");
    }

    #[test]
    fn resolves_each_category() {
        let spec = parse::from_yaml(DOC).unwrap();
        let resolver = DefaultSchemaResolver::new(&spec);

        let schema = resolver
            .resolve_reference("#/components/schemas/pet_record")
            .unwrap();
        assert_eq!(schema.type_name, "PetRecord");
        assert_eq!(schema.category, ComponentCategory::Schemas);

        let response = resolver
            .resolve_reference("#/components/responses/NotFound")
            .unwrap();
        assert!(matches!(response.target, RefTarget::Response(_)));

        let param = resolver
            .resolve_reference("#/components/parameters/Limit")
            .unwrap();
        assert_eq!(
            param.category,
            ComponentCategory::Other("parameters".to_string())
        );
        assert!(matches!(param.target, RefTarget::Parameter(_)));

        assert!(resolver.resolve_reference("#/components/schemas/Nope").is_none());
        assert!(resolver.resolve_reference("not-a-ref").is_none());
    }

    #[test]
    fn shape_follows_all_of_members() {
        let spec = parse::from_yaml(DOC).unwrap();
        let resolver = DefaultSchemaResolver::new(&spec);
        let shape =
            resolver.schema_shape(&SchemaOrRef::reference("#/components/schemas/Extended"));
        assert!(shape.is_object);
        assert!(!shape.all_fields_optional);
        assert_eq!(shape.field_names, vec!["id", "tag", "note"]);
    }
}
