//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [service] Section Defaults
// ============================================================================

pub mod service {
    pub fn title() -> String {
        "wiki".into()
    }

    pub fn default_restype() -> String {
        "html".into()
    }
}

// ============================================================================
// [admin] Section Defaults
// ============================================================================

pub mod admin {
    pub fn email() -> String {
        "admin@noreply.wiki".into()
    }
}

// ============================================================================
// [highlight] Section Defaults
// ============================================================================

pub mod highlight {
    pub fn supported_languages() -> Vec<String> {
        [
            "bash", "c", "cpp", "css", "go", "html", "java", "javascript", "python", "ruby",
            "rust", "sql", "xml",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

// ============================================================================
// [render] Section Defaults
// ============================================================================

pub mod render {
    pub fn max_depth() -> usize {
        64
    }

    pub fn loopback_prefix() -> String {
        "http://localhost".into()
    }
}
