//! Column storage and typed value representation.

mod canonical;
mod render;
mod value;

pub use canonical::{CanonicalValue, ValueKey, ValueKind};
pub use render::to_text;
pub use value::{Column, RawValue};
