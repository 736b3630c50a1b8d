//! Response assembly helpers.
//!
//! Picks the output format of a request, hands page data plus the render
//! context to the template engine, and prepares bodies for GET and HEAD.

use crate::{
    config::SiteConfig,
    context::{RenderContext, RequestFacts},
};
use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as Json};

/// Query parameter that selects the response format.
pub const RESTYPE_PARAM: &str = "_type";

/// Requested response format, from `_type` or the configured default.
pub fn restype<'a>(request: &'a RequestFacts, default: &'a str) -> &'a str {
    request.query_param(RESTYPE_PARAM).unwrap_or(default)
}

/// Format a request asks for, falling back to `[service].default_restype`.
///
/// `None` when the `_type` value names a format this crate does not produce.
pub fn requested_format(request: &RequestFacts, config: &SiteConfig) -> Option<ResponseFormat> {
    ResponseFormat::parse(restype(request, &config.service.default_restype))
}

/// Formats the view layer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Atom,
}

impl ResponseFormat {
    pub fn parse(restype: &str) -> Option<Self> {
        match restype {
            "html" | "default" => Some(Self::Html),
            "atom" => Some(Self::Atom),
            _ => None,
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Atom => "application/atom+xml; charset=utf-8",
        }
    }
}

// ============================================================================
// Response Body
// ============================================================================

/// A computed response body.
///
/// For HEAD requests the body is computed so its length is known, but it is
/// not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody {
    body: Option<String>,
    content_length: usize,
}

impl ResponseBody {
    pub fn new(body: String, head: bool) -> Self {
        let content_length = body.len();
        Self {
            body: (!head).then_some(body),
            content_length,
        }
    }

    /// Bytes to transmit; `None` for HEAD.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Byte length of the full body, also for HEAD.
    pub const fn content_length(&self) -> usize {
        self.content_length
    }
}

// ============================================================================
// Templates
// ============================================================================

/// External template engine.
pub trait TemplateEngine {
    fn render(&self, template: &str, data: &Json) -> Result<String>;
}

/// Render a page template with the request context merged into its data.
///
/// Context keys (`is_local`, `is_mobile`, `user`, `preferences`, `cur_url`,
/// `config`, `app`) replace page data of the same name.
pub fn render_template(
    engine: &impl TemplateEngine,
    template: &str,
    context: &RenderContext,
    mut data: Map<String, Json>,
) -> Result<String> {
    let Json::Object(context) =
        serde_json::to_value(context).context("failed to serialize render context")?
    else {
        bail!("render context did not serialize to an object");
    };

    data.extend(context);
    engine
        .render(template, &Json::Object(data))
        .with_context(|| format!("failed to render template `{template}`"))
}
