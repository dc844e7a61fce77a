use std::fmt;

use serde::Serialize;

use super::route::Route;
use crate::schema::Component;

/// The route IR built from one document.
#[derive(Debug, Clone, Serialize)]
pub struct IrSpec {
    pub info: IrInfo,
    /// Routes in document order (paths, then methods within a path).
    pub routes: Vec<Route>,
    pub modules: Vec<IrModule>,
    /// Indices of routes without a namespace.
    pub out_of_module: Vec<usize>,
    /// Components hoisted out of inline schemas during the run.
    pub components: Vec<Component>,
}

impl IrSpec {
    pub fn module(&self, name: &str) -> Option<&IrModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Routes of one module, in module order.
    pub fn module_routes<'a>(&'a self, module: &'a IrModule) -> impl Iterator<Item = &'a Route> {
        module.routes.iter().filter_map(|&i| self.routes.get(i))
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct IrInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

/// Routes sharing a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrModule {
    pub name: String,
    pub routes: Vec<usize>, // indices into IrSpec.routes
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub screaming_snake: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A type tree built from a schema, rendered into a type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    String,
    StringLiteral(String),
    /// Numeric or boolean literal from `enum` / `const`.
    Literal(String),
    Number,
    Integer,
    Boolean,
    Null,
    Array(Box<IrType>),
    Object(Vec<(String, IrType, bool)>), // inline object: (name, type, required)
    Map(Box<IrType>),                    // Record<string, T>
    Ref(String),                         // formatted name of a component
    Union(Vec<IrType>),
    Intersection(Vec<IrType>),
    Any,
    DateTime,
    Binary,
}
