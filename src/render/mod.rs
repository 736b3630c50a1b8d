//! Structured data rendering.
//!
//! Pages can embed metadata trees (e.g. schema-tagged data). This module
//! holds the tree type and turns it into HTML for the page template.

mod html;
mod value;

pub use html::ValueRenderer;
pub use value::{Primitive, Value};

use thiserror::Error;

/// Value rendering errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("value tree is nested deeper than {limit} levels")]
    StructureTooDeep { limit: usize },

    #[error("duplicate mapping key `{0}`")]
    DuplicateKey(String),
}
