//! Request-scoped template context.
//!
//! Collects the facts every page template needs (who is asking, from what
//! kind of device, under which config) into a [`RenderContext`].

mod identity;

pub use identity::{Identity, IdentityProvider, PreferenceRecord, PreferenceStore};

use crate::config::SiteConfig;
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};

/// User-Agent tokens that mark a mobile browser.
const MOBILE_PATTERN: &str =
    r"Android|Fennec|GoBrowser|iPad|iPhone|iPod|Mobile|Opera Mini|Opera Mobi|Windows CE";

// ============================================================================
// Request Facts
// ============================================================================

/// The parts of an incoming request the view layer looks at.
#[derive(Debug, Clone, Default)]
pub struct RequestFacts {
    /// Scheme and host, e.g. `http://localhost:8080`.
    pub host_url: String,
    /// Full request URL.
    pub url: String,
    pub user_agent: Option<String>,
    /// Decoded query parameters in request order.
    pub query: Vec<(String, String)>,
}

impl RequestFacts {
    pub fn new(host_url: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            host_url: host_url.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// Application metadata exposed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub version: String,
}

/// Everything a page template gets besides its own data.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub is_local: bool,
    pub is_mobile: bool,
    pub user: Option<Identity>,
    pub preferences: Option<PreferenceRecord>,
    pub config: Arc<SiteConfig>,
    #[serde(rename = "cur_url")]
    pub current_url: String,
    pub app: AppInfo,
}

/// Builds [`RenderContext`]s from request facts and the user services.
pub struct ContextAssembler<'a, I, P> {
    identity: &'a I,
    preferences: &'a P,
}

impl<'a, I: IdentityProvider, P: PreferenceStore> ContextAssembler<'a, I, P> {
    pub fn new(identity: &'a I, preferences: &'a P) -> Self {
        Self {
            identity,
            preferences,
        }
    }

    /// Assemble the context for one request.
    ///
    /// A missing user or missing preferences leave the fields unset.
    pub fn assemble(
        &self,
        request: &RequestFacts,
        config: Arc<SiteConfig>,
        app_version: &str,
    ) -> RenderContext {
        let user = self.identity.current_user();
        let preferences = user
            .as_ref()
            .and_then(|u| self.preferences.lookup_by_email(&u.email));

        RenderContext {
            is_local: request.host_url.starts_with(&config.render.loopback_prefix),
            is_mobile: is_mobile_user_agent(request.user_agent.as_deref()),
            user,
            preferences,
            current_url: request.url.clone(),
            config,
            app: AppInfo {
                version: app_version.to_owned(),
            },
        }
    }
}

/// Whether the User-Agent names a mobile browser. Case-sensitive; a missing
/// header is not mobile.
pub fn is_mobile_user_agent(user_agent: Option<&str>) -> bool {
    static RE_MOBILE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(MOBILE_PATTERN).expect("mobile pattern is valid"));

    user_agent.is_some_and(|ua| RE_MOBILE.is_match(ua))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
                             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/604.1";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    fn prefs_for(email: &str, title: &str) -> HashMap<String, PreferenceRecord> {
        let mut store = HashMap::new();
        store.insert(
            email.to_string(),
            PreferenceRecord {
                userpage_title: Some(title.to_string()),
            },
        );
        store
    }

    #[test]
    fn test_is_mobile_user_agent() {
        assert!(is_mobile_user_agent(Some(IPHONE_UA)));
        assert!(is_mobile_user_agent(Some("Opera Mini/4.2")));
        assert!(!is_mobile_user_agent(Some(DESKTOP_UA)));
        assert!(!is_mobile_user_agent(None));
    }

    #[test]
    fn test_is_mobile_is_case_sensitive() {
        assert!(!is_mobile_user_agent(Some("some iphone clone")));
    }

    #[test]
    fn test_assemble_anonymous() {
        let identity: Option<Identity> = None;
        let prefs: HashMap<String, PreferenceRecord> = HashMap::new();
        let request = RequestFacts::new("https://wiki.example.com", "https://wiki.example.com/Home");

        let ctx = ContextAssembler::new(&identity, &prefs).assemble(
            &request,
            Arc::new(SiteConfig::default()),
            "1.2.3",
        );

        assert!(!ctx.is_local);
        assert!(!ctx.is_mobile);
        assert!(ctx.user.is_none());
        assert!(ctx.preferences.is_none());
        assert_eq!(ctx.current_url, "https://wiki.example.com/Home");
        assert_eq!(ctx.app.version, "1.2.3");
    }

    #[test]
    fn test_assemble_signed_in_local_mobile() {
        let identity = Some(Identity::new("alice@example.com"));
        let prefs = prefs_for("alice@example.com", "Alice");
        let request = RequestFacts::new("http://localhost:8080", "http://localhost:8080/Home")
            .with_user_agent(IPHONE_UA);

        let ctx = ContextAssembler::new(&identity, &prefs).assemble(
            &request,
            Arc::new(SiteConfig::default()),
            "1.2.3",
        );

        assert!(ctx.is_local);
        assert!(ctx.is_mobile);
        assert_eq!(ctx.user, Some(Identity::new("alice@example.com")));
        assert_eq!(
            ctx.preferences.unwrap().userpage_title.as_deref(),
            Some("Alice")
        );
    }

    #[test]
    fn test_assemble_user_without_preferences() {
        let identity = Some(Identity::new("bob@example.com"));
        let prefs = prefs_for("alice@example.com", "Alice");
        let request = RequestFacts::new("https://wiki.example.com", "https://wiki.example.com/");

        let ctx = ContextAssembler::new(&identity, &prefs).assemble(
            &request,
            Arc::new(SiteConfig::default()),
            "1.2.3",
        );

        assert!(ctx.user.is_some());
        assert!(ctx.preferences.is_none());
    }

    #[test]
    fn test_config_passes_through_unchanged() {
        let identity: Option<Identity> = None;
        let prefs: HashMap<String, PreferenceRecord> = HashMap::new();
        let mut config = SiteConfig::default();
        config.service.title = "ecogwiki".into();
        let config = Arc::new(config);

        let ctx = ContextAssembler::new(&identity, &prefs).assemble(
            &RequestFacts::default(),
            Arc::clone(&config),
            "0.1.0",
        );

        assert!(Arc::ptr_eq(&ctx.config, &config));
    }

    #[test]
    fn test_query_param() {
        let request = RequestFacts::default()
            .with_query("_type", "atom")
            .with_query("_type", "html");
        assert_eq!(request.query_param("_type"), Some("atom"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_context_serializes_template_keys() {
        let identity: Option<Identity> = None;
        let prefs: HashMap<String, PreferenceRecord> = HashMap::new();
        let ctx = ContextAssembler::new(&identity, &prefs).assemble(
            &RequestFacts::new("http://localhost", "http://localhost/"),
            Arc::new(SiteConfig::default()),
            "0.1.0",
        );

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["is_local"], true);
        assert_eq!(json["cur_url"], "http://localhost/");
        assert_eq!(json["app"]["version"], "0.1.0");
        assert_eq!(json["config"]["service"]["title"], "wiki");
        assert!(json["user"].is_null());
    }
}
