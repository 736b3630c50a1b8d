//! Request principal and per-user preferences.
//!
//! Both are owned by external services; this crate only reads them through
//! [`IdentityProvider`] and [`PreferenceStore`].

use serde::Serialize;
use std::collections::HashMap;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Stored preferences of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreferenceRecord {
    /// Title of the user's own wiki page, if they picked one.
    pub userpage_title: Option<String>,
}

impl PreferenceRecord {
    /// The userpage title, unless it is missing or blank.
    pub fn display_title(&self) -> Option<&str> {
        self.userpage_title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
    }
}

/// Source of the current request's principal.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<Identity>;
}

/// Lookup of user preferences by email.
pub trait PreferenceStore {
    fn lookup_by_email(&self, email: &str) -> Option<PreferenceRecord>;
}

impl IdentityProvider for Option<Identity> {
    fn current_user(&self) -> Option<Identity> {
        self.clone()
    }
}

impl PreferenceStore for HashMap<String, PreferenceRecord> {
    fn lookup_by_email(&self, email: &str) -> Option<PreferenceRecord> {
        self.get(email).cloned()
    }
}
