use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;

use super::{ComponentCategory, SchemaResolver};

/// A named schema known to the run: document components plus everything
/// hoisted so far. Body type resolution reuses these by name or content.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchema {
    pub name: String,
    pub type_name: String,
    pub ref_path: String,
    /// Inline type expression of the schema.
    pub content: String,
}

/// A component created by hoisting an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub type_name: String,
    pub ref_path: String,
    pub category: ComponentCategory,
    pub schema: SchemaOrRef,
}

/// Owns the names taken by components during one run.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    taken: HashSet<String>,
    parsed: Vec<ParsedSchema>,
    created: Vec<Component>,
}

impl ComponentRegistry {
    /// Seed the registry with the document's own `components/schemas`.
    pub fn from_spec(spec: &OpenApiSpec, resolver: &dyn SchemaResolver) -> Self {
        let mut registry = Self::default();
        let Some(components) = &spec.components else {
            return registry;
        };
        for (name, schema) in &components.schemas {
            let type_name = resolver.format_identifier(name);
            registry.taken.insert(type_name.clone());
            registry.parsed.push(ParsedSchema {
                name: name.clone(),
                type_name,
                ref_path: format!("#/components/schemas/{name}"),
                content: resolver.inline_type_expression(schema),
            });
        }
        registry
    }

    pub fn parsed_schemas(&self) -> &[ParsedSchema] {
        &self.parsed
    }

    pub fn components(&self) -> &[Component] {
        &self.created
    }

    pub fn into_components(self) -> Vec<Component> {
        self.created
    }

    /// Create a component under the first candidate whose formatted name is
    /// free. When every candidate is taken, the first one gets the smallest
    /// free numeric suffix starting at 2.
    pub fn create_component(
        &mut self,
        resolver: &dyn SchemaResolver,
        category: ComponentCategory,
        candidates: &[String],
        schema: SchemaOrRef,
    ) -> Component {
        let chosen = candidates
            .iter()
            .find(|candidate| !self.taken.contains(&resolver.format_identifier(candidate)))
            .cloned()
            .unwrap_or_else(|| {
                let base = candidates
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Component".to_string());
                let mut i = 2;
                loop {
                    let candidate = format!("{base}{i}");
                    if !self.taken.contains(&resolver.format_identifier(&candidate)) {
                        return candidate;
                    }
                    i += 1;
                }
            });

        let type_name = resolver.format_identifier(&chosen);
        let ref_path = format!("#/components/{}/{}", category.section(), chosen);
        debug!("created component {type_name} ({ref_path})");

        self.taken.insert(type_name.clone());
        self.parsed.push(ParsedSchema {
            name: chosen,
            type_name: type_name.clone(),
            ref_path: ref_path.clone(),
            content: resolver.inline_type_expression(&schema),
        });
        let component = Component {
            type_name,
            ref_path,
            category,
            schema,
        };
        self.created.push(component.clone());
        component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::schema::Schema;
    use crate::schema::DefaultSchemaResolver;

    const DOC: &str = r#"
openapi: "3.0.3"
info:
  title: registry
  version: "1"
paths: {}
components:
  schemas:
    GetPetData:
      type: string
"#;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn skips_names_used_by_the_document() {
        let spec = parse::from_yaml(DOC).unwrap();
        let resolver = DefaultSchemaResolver::new(&spec);
        let mut registry = ComponentRegistry::from_spec(&spec, &resolver);

        let component = registry.create_component(
            &resolver,
            ComponentCategory::Schemas,
            &candidates(&["GetPetData", "GetPetResult"]),
            Schema::string().into(),
        );
        assert_eq!(component.type_name, "GetPetResult");
        assert_eq!(component.ref_path, "#/components/schemas/GetPetResult");
        assert_eq!(registry.components().len(), 1);
        assert_eq!(registry.parsed_schemas().len(), 2);
    }

    #[test]
    fn falls_back_to_numeric_suffix() {
        let spec = parse::from_yaml(DOC).unwrap();
        let resolver = DefaultSchemaResolver::new(&spec);
        let mut registry = ComponentRegistry::from_spec(&spec, &resolver);
        let names = candidates(&["GetPetData"]);

        let second = registry.create_component(
            &resolver,
            ComponentCategory::Schemas,
            &names,
            Schema::string().into(),
        );
        let third = registry.create_component(
            &resolver,
            ComponentCategory::Schemas,
            &names,
            Schema::string().into(),
        );
        assert_eq!(second.type_name, "GetPetData2");
        assert_eq!(third.type_name, "GetPetData3");
    }
}
