//! `[service]` and `[admin]` section configuration.
//!
//! Contains the site identity used by feeds and page chrome.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[service]` section in wiki.toml - site metadata.
///
/// # Example
/// ```toml
/// [service]
/// title = "ecogwiki"
/// default_restype = "html"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Site title, also used for the site-wide post feed title.
    #[serde(default = "defaults::service::title")]
    #[educe(Default = defaults::service::title())]
    pub title: String,

    /// Response format used when a request carries no `_type` parameter.
    #[serde(default = "defaults::service::default_restype")]
    #[educe(Default = defaults::service::default_restype())]
    pub default_restype: String,
}

/// `[admin]` section in wiki.toml - site operator contact.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Feed-level author identity.
    #[serde(default = "defaults::admin::email")]
    #[educe(Default = defaults::admin::email())]
    pub email: String,
}
