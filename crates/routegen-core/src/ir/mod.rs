pub mod route;
pub mod types;

pub use crate::parse::operation::HttpMethod;
pub use route::*;
pub use types::{IrInfo, IrModule, IrSpec, IrType, NormalizedName};
