//! Title to URL path conversion.
//!
//! Wiki titles map to path segments: whitespace becomes `_` and the result
//! is percent-encoded, with `/` kept as a separator for subpages.

/// Route prefix for the `+` namespace (already percent-encoded).
const PLUS_PREFIX: &str = "/%2B";

// ============================================================================
// Slugification
// ============================================================================

/// Convert a page title into its URL-safe path segment.
///
/// | Title | Path |
/// |-------|------|
/// | `Home` | `Home` |
/// | `Foo Bar` | `Foo_Bar` |
/// | `A/B c` | `A/B_c` |
/// | `위키` | `%EC%9C%84%ED%82%A4` |
pub fn title_to_path(title: &str) -> String {
    let underscored: String = title
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    urlencoding::encode(&underscored).replace("%2F", "/")
}

// ============================================================================
// Path Helpers
// ============================================================================

/// Absolute path of a page: `/Foo_Bar`
pub fn to_path(title: &str) -> String {
    format!("/{}", title_to_path(title))
}

/// Relative path of a page: `Foo_Bar`
pub fn to_rel_path(title: &str) -> String {
    title_to_path(title)
}

/// Absolute path of a page under the `+` route: `/%2BFoo_Bar`
pub fn to_plus_path(title: &str) -> String {
    format!("{PLUS_PREFIX}{}", title_to_path(title))
}
