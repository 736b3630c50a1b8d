//! `[render]` and `[highlight]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in wiki.toml.
///
/// # Example
/// ```toml
/// [render]
/// max_depth = 32
/// loopback_prefix = "http://localhost"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Nesting bound for structured value rendering.
    #[serde(default = "defaults::render::max_depth")]
    #[educe(Default = defaults::render::max_depth())]
    pub max_depth: usize,

    /// Host URL prefix that marks a request as local.
    #[serde(default = "defaults::render::loopback_prefix")]
    #[educe(Default = defaults::render::loopback_prefix())]
    pub loopback_prefix: String,
}

/// `[highlight]` section in wiki.toml - code highlighting support.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    #[serde(default = "defaults::highlight::supported_languages")]
    #[educe(Default = defaults::highlight::supported_languages())]
    pub supported_languages: Vec<String>,
}
