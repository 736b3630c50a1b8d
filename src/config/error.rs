//! Errors raised while loading `wiki.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, parse or accept a wiki configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read wiki config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("wiki.toml is not valid TOML")]
    Toml(#[from] toml::de::Error),

    /// A setting parsed but has an unusable value. `field` is the dotted
    /// TOML path, e.g. `render.max_depth`.
    #[error("invalid wiki.toml setting `[{field}]`: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// TOML path of the rejected setting, for validation errors.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
