//! Site configuration management for `wiki.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                       |
//! |---------------|-----------------------------------------------|
//! | `[service]`   | Site title and default response format        |
//! | `[admin]`     | Operator contact, used as feed author         |
//! | `[highlight]` | Languages supported by code highlighting      |
//! | `[render]`    | Structured value depth bound, loopback prefix |
//!
//! # Example
//!
//! ```toml
//! [service]
//! title = "ecogwiki"
//!
//! [admin]
//! email = "ops@example.com"
//!
//! [highlight]
//! supported_languages = ["python", "rust"]
//!
//! [render]
//! max_depth = 64
//! ```

mod base;
pub mod defaults;
mod error;
mod handle;
mod render;

pub use base::{AdminConfig, ServiceConfig};
pub use error::ConfigError;
pub use handle::ConfigHandle;
pub use render::{HighlightConfig, RenderConfig};

use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing wiki.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site information
    #[serde(default)]
    pub service: ServiceConfig,

    /// Operator contact
    #[serde(default)]
    pub admin: AdminConfig,

    /// Code highlighting settings
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Value rendering and request classification settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.render.max_depth == 0 {
            bail!(ConfigError::invalid("render.max_depth", "must be greater than zero"));
        }

        if !self.admin.email.contains('@') {
            bail!(ConfigError::invalid("admin.email", "must be an email address"));
        }

        if !self.render.loopback_prefix.starts_with("http") {
            bail!(ConfigError::invalid(
                "render.loopback_prefix",
                "must start with http:// or https://"
            ));
        }

        Ok(())
    }
}
