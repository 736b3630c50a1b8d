//! Value tree to HTML.
//!
//! # Markup
//!
//! ```text
//! Mapping (2+ entries)           Sequence                Scalar
//! <dl class="wq wq-dict">        <ul class="wq wq-list">  <a href="/Foo_Bar">Foo Bar</a>
//! <dt class="wq-key-K">          <li>
//! K                              ...                     (key "schema": plain text)
//! </dt>                          </li>
//! <dd class="wq-value-K">        </ul>
//! ...
//! </dd>
//! </dl>
//! ```
//!
//! A mapping with a single entry collapses to the rendering of its value.

use super::{RenderError, Value};
use crate::{
    config::{SiteConfig, defaults},
    utils::{html::html_escape, slug::to_path},
};
use std::borrow::Cow;

/// Key whose scalar values are identifiers rather than page references.
const SCHEMA_KEY: &str = "schema";

/// Renders [`Value`] trees into HTML fragments.
#[derive(Debug, Clone, Copy)]
pub struct ValueRenderer {
    max_depth: usize,
}

impl Default for ValueRenderer {
    fn default() -> Self {
        Self::new(defaults::render::max_depth())
    }
}

impl ValueRenderer {
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.render.max_depth)
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render a value. `key` is the mapping key the value sits under, if any.
    pub fn render(&self, value: &Value, key: Option<&str>) -> Result<String, RenderError> {
        self.render_at(value, key, 0)
    }

    fn render_at(&self, value: &Value, key: Option<&str>, depth: usize) -> Result<String, RenderError> {
        if depth > self.max_depth {
            return Err(RenderError::StructureTooDeep {
                limit: self.max_depth,
            });
        }

        match value {
            Value::Mapping(entries) => self.render_mapping(entries, depth),
            Value::Sequence(items) => self.render_sequence(items, depth),
            Value::Scalar(text) => Ok(render_scalar(text, key)),
            Value::Foreign(primitive) => Ok(render_scalar(&primitive.to_string(), key)),
        }
    }

    fn render_mapping(&self, entries: &[(String, Value)], depth: usize) -> Result<String, RenderError> {
        if let [(key, value)] = entries {
            return self.render_at(value, Some(key.as_str()), depth + 1);
        }

        let mut html: Vec<Cow<'_, str>> = vec![Cow::Borrowed(r#"<dl class="wq wq-dict">"#)];
        for (key, value) in entries {
            let class = class_fragment(key);
            html.push(format!(r#"<dt class="wq-key-{class}">"#).into());
            html.push(html_escape(key));
            html.push("</dt>".into());
            html.push(format!(r#"<dd class="wq-value-{class}">"#).into());
            html.push(self.render_at(value, Some(key.as_str()), depth + 1)?.into());
            html.push("</dd>".into());
        }
        html.push("</dl>".into());

        Ok(html.join("\n"))
    }

    fn render_sequence(&self, items: &[Value], depth: usize) -> Result<String, RenderError> {
        let mut html: Vec<Cow<'_, str>> = vec![Cow::Borrowed(r#"<ul class="wq wq-list">"#)];
        for item in items {
            html.push("<li>".into());
            html.push(self.render_at(item, None, depth + 1)?.into());
            html.push("</li>".into());
        }
        html.push("</ul>".into());

        Ok(html.join("\n"))
    }
}

/// Schema identifiers render as text, everything else links to its page.
fn render_scalar(text: &str, key: Option<&str>) -> String {
    if key == Some(SCHEMA_KEY) {
        return html_escape(text).into_owned();
    }

    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(&to_path(text)),
        html_escape(text)
    )
}

/// Reduce a mapping key to characters safe inside a class attribute.
fn class_fragment(key: &str) -> Cow<'_, str> {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if key.chars().all(is_safe) {
        return Cow::Borrowed(key);
    }
    Cow::Owned(key.chars().map(|c| if is_safe(c) { c } else { '-' }).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Primitive;
    use serde_json::json;

    fn render(value: &Value) -> String {
        ValueRenderer::default().render(value, None).unwrap()
    }

    #[test]
    fn test_single_entry_mapping_collapses() {
        let value = Value::mapping([("a", Value::scalar("X"))]).unwrap();
        assert_eq!(render(&value), render(&Value::scalar("X")));
    }

    #[test]
    fn test_single_entry_mapping_passes_key_hint() {
        let value = Value::mapping([("schema", Value::scalar("Book"))]).unwrap();
        assert_eq!(render(&value), "Book");
    }

    #[test]
    fn test_multi_entry_mapping() {
        let value = Value::mapping([("a", Value::scalar("V1")), ("b", Value::scalar("V2"))]).unwrap();
        let expected = [
            r#"<dl class="wq wq-dict">"#,
            r#"<dt class="wq-key-a">"#,
            "a",
            "</dt>",
            r#"<dd class="wq-value-a">"#,
            r#"<a href="/V1">V1</a>"#,
            "</dd>",
            r#"<dt class="wq-key-b">"#,
            "b",
            "</dt>",
            r#"<dd class="wq-value-b">"#,
            r#"<a href="/V2">V2</a>"#,
            "</dd>",
            "</dl>",
        ]
        .join("\n");
        assert_eq!(render(&value), expected);
    }

    #[test]
    fn test_schema_key_inside_mapping() {
        let value = Value::mapping([
            ("schema", Value::scalar("Book")),
            ("author", Value::scalar("Foo Bar")),
        ])
        .unwrap();
        let html = render(&value);

        assert!(html.contains("<dd class=\"wq-value-schema\">\nBook\n</dd>"));
        assert!(html.contains(r#"<a href="/Foo_Bar">Foo Bar</a>"#));
    }

    #[test]
    fn test_sequence() {
        let value = Value::Sequence(vec![Value::scalar("A"), Value::scalar("B")]);
        let expected = [
            r#"<ul class="wq wq-list">"#,
            "<li>",
            r#"<a href="/A">A</a>"#,
            "</li>",
            "<li>",
            r#"<a href="/B">B</a>"#,
            "</li>",
            "</ul>",
        ]
        .join("\n");
        assert_eq!(render(&value), expected);
    }

    #[test]
    fn test_sequence_does_not_propagate_key_hint() {
        let value = Value::Sequence(vec![Value::scalar("Book")]);
        let html = ValueRenderer::default().render(&value, Some("schema")).unwrap();
        assert!(html.contains(r#"<a href="/Book">Book</a>"#));
    }

    #[test]
    fn test_schema_scalar_is_plain_text() {
        let html = ValueRenderer::default()
            .render(&Value::scalar("Foo Bar"), Some("schema"))
            .unwrap();
        assert_eq!(html, "Foo Bar");
    }

    #[test]
    fn test_scalar_is_link() {
        assert_eq!(
            render(&Value::scalar("Foo Bar")),
            r#"<a href="/Foo_Bar">Foo Bar</a>"#
        );
    }

    #[test]
    fn test_scalar_is_escaped() {
        assert_eq!(
            render(&Value::scalar("<b>")),
            r#"<a href="/%3Cb%3E">&lt;b&gt;</a>"#
        );
    }

    #[test]
    fn test_foreign_values_render_as_links() {
        assert_eq!(
            render(&Value::Foreign(Primitive::Integer(42))),
            r#"<a href="/42">42</a>"#
        );
        assert_eq!(
            render(&Value::Foreign(Primitive::Bool(false))),
            r#"<a href="/false">false</a>"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&Value::Sequence(vec![])), "<ul class=\"wq wq-list\">\n</ul>");
        assert_eq!(render(&Value::Mapping(vec![])), "<dl class=\"wq wq-dict\">\n</dl>");
    }

    #[test]
    fn test_unsafe_key_class_is_sanitized() {
        let value = Value::mapping([
            (r#"x" onclick="y"#, Value::scalar("A")),
            ("b", Value::scalar("B")),
        ])
        .unwrap();
        let html = render(&value);

        assert!(html.contains(r#"<dt class="wq-key-x--onclick--y">"#));
        assert!(html.contains("x&quot; onclick=&quot;y"));
        assert!(!html.contains(r#"onclick="y""#));
    }

    #[test]
    fn test_nested_json_tree() {
        let value = Value::from(json!({
            "schema": "Book",
            "author": ["Alice", "Bob"],
        }));
        let html = render(&value);

        assert!(html.starts_with(r#"<dl class="wq wq-dict">"#));
        assert!(html.contains(r#"<ul class="wq wq-list">"#));
        assert!(html.contains(r#"<a href="/Alice">Alice</a>"#));
        assert!(html.ends_with("</dl>"));
    }

    #[test]
    fn test_depth_limit_exceeded() {
        let mut value = Value::scalar("leaf");
        for _ in 0..1000 {
            value = Value::Sequence(vec![value]);
        }

        let err = ValueRenderer::default().render(&value, None).unwrap_err();
        assert!(matches!(err, RenderError::StructureTooDeep { limit: 64 }));
    }

    #[test]
    fn test_depth_limit_boundary() {
        let renderer = ValueRenderer::new(2);
        let nested = |levels: usize| {
            let mut value = Value::scalar("leaf");
            for _ in 0..levels {
                value = Value::Sequence(vec![value]);
            }
            value
        };

        assert!(renderer.render(&nested(2), None).is_ok());
        assert!(renderer.render(&nested(3), None).is_err());
    }
}
