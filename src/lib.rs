//! wikiview - view-layer rendering for a wiki service.
//!
//! - [`render`]: structured value trees to HTML
//! - [`generator::feed`]: Atom feeds for page collections
//! - [`context`]: request-scoped template context
//! - [`utils`]: timestamp, path and user markup helpers
//! - [`response`]: format selection, template hand-off, HEAD bodies

pub mod config;
pub mod context;
pub mod generator;
pub mod render;
pub mod response;
pub mod utils;

/// Application version exposed to templates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
