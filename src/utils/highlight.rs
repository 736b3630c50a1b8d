//! Code highlighting support checks.

use crate::config::SiteConfig;

/// Whether any of the page's hashbang languages can be highlighted.
pub fn has_supported_language<S: AsRef<str>>(config: &SiteConfig, hashbangs: &[S]) -> bool {
    let supported = &config.highlight.supported_languages;
    hashbangs
        .iter()
        .any(|lang| supported.iter().any(|s| s == lang.as_ref()))
}
