pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod schema;
pub mod transform;

pub use transform::{GenerationSession, TransformOptions, transform, transform_with_options};
