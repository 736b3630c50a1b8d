//! User identity markup.

use crate::{
    context::{Identity, PreferenceStore},
    utils::{html::html_escape, slug::to_path},
};

/// Markup shown for requests without a signed-in user.
pub const ANONYMOUS_MARKUP: &str = r#"<span class="user">Anonymous</span>"#;

/// Render a user reference.
///
/// - anonymous: [`ANONYMOUS_MARKUP`]
/// - no userpage title (missing or blank): the email in a span
/// - userpage title: a wiki link to that page
pub fn userpage_link(user: Option<&Identity>, preferences: &impl PreferenceStore) -> String {
    let Some(user) = user else {
        return ANONYMOUS_MARKUP.to_owned();
    };

    let prefs = preferences.lookup_by_email(&user.email);
    match prefs.as_ref().and_then(|p| p.display_title()) {
        Some(title) => format!(
            r#"<a href="{}" class="user userpage wikilink">{}</a>"#,
            html_escape(&to_path(title)),
            html_escape(title)
        ),
        None => format!(r#"<span class="user email">{}</span>"#, html_escape(&user.email)),
    }
}
