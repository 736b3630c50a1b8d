//! Atom feed generation.
//!
//! Serializes page-derived entries into an Atom 1.0 document.
//!
//! # Feed Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <feed xmlns="http://www.w3.org/2005/Atom">
//!   <title type="text">wiki: posts</title>
//!   <id>https://example.com/sp.posts?_type=atom</id>
//!   <updated>2024-01-01T00:00:00Z</updated>
//!   <link href="https://example.com/"/>
//!   <link href="https://example.com/sp.posts?_type=atom" rel="self"/>
//!   <author>
//!     <name>admin@example.com</name>
//!   </author>
//!   <generator>wikiview</generator>
//!   <entry>
//!     <title type="text">Hello</title>
//!     <id>https://example.com/Hello</id>
//!     <updated>2024-01-01T00:00:00Z</updated>
//!     <link href="https://example.com/Hello"/>
//!     <author>
//!       <name>alice@example.com</name>
//!     </author>
//!     <content type="html">&lt;p&gt;hi&lt;/p&gt;</content>
//!   </entry>
//! </feed>
//! ```
//!
//! Entries are written in the order given. Callers sort them (usually newest
//! first).

use crate::{
    config::SiteConfig,
    utils::{
        date::format_iso_datetime,
        slug::title_to_path,
        xml::{
            XmlWriter, create_xml_writer, finish_xml_writer, write_empty_elem, write_end_elem,
            write_start_elem, write_text_element, write_text_element_with_attrs,
        },
    },
};
use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for Atom
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Path of the site-wide post listing
const POSTS_PATH: &str = "sp.posts";

const GENERATOR: &str = "wikiview";

// ============================================================================
// Types
// ============================================================================

/// Feed generation errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed entry {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error(transparent)]
    Xml(#[from] anyhow::Error),
}

/// One syndicated item.
///
/// Every field is required; they are optional here so that incomplete
/// records can be represented and rejected by [`FeedBuilder::build`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub author: Option<String>,
    /// Absolute URL of the page.
    pub url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedEntry {
    pub fn new(
        title: impl Into<String>,
        content_html: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content_html: Some(content_html.into()),
            author: Some(author.into()),
            url: Some(url.into()),
            updated_at: Some(updated_at),
        }
    }

    fn validate(&self, index: usize) -> Result<ValidEntry<'_>, FeedError> {
        let missing = |field| FeedError::MissingField { index, field };

        Ok(ValidEntry {
            title: self.title.as_deref().ok_or_else(|| missing("title"))?,
            content_html: self
                .content_html
                .as_deref()
                .ok_or_else(|| missing("contentHtml"))?,
            author: self.author.as_deref().ok_or_else(|| missing("author"))?,
            url: self.url.as_deref().ok_or_else(|| missing("url"))?,
            updated_at: self.updated_at.ok_or_else(|| missing("updatedAt"))?,
        })
    }
}

/// Entry with every field present.
struct ValidEntry<'a> {
    title: &'a str,
    content_html: &'a str,
    author: &'a str,
    url: &'a str,
    updated_at: DateTime<Utc>,
}

/// Page record as provided by the page store.
#[derive(Debug, Clone, Default)]
pub struct PageRecord {
    pub title: String,
    pub rendered_body: String,
    /// Email of the last modifier.
    pub modifier: Option<String>,
    /// Site-relative URL, e.g. `/Hello_World`.
    pub absolute_url: String,
    pub published_at: Option<NaiveDateTime>,
}

impl PageRecord {
    fn to_entry(&self, host_url: &str) -> FeedEntry {
        FeedEntry {
            title: Some(self.title.clone()),
            content_html: Some(self.rendered_body.clone()),
            author: self.modifier.clone(),
            url: Some(format!("{host_url}{}", self.absolute_url)),
            updated_at: self.published_at.map(|dt| dt.and_utc()),
        }
    }
}

/// What the feed represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedIdentity {
    /// All posts of the site; title and address come from config.
    SiteWide,
    /// One named collection, e.g. a single page's entries.
    Collection { title: String, self_url: String },
}

impl FeedIdentity {
    /// Collection feed of a page, addressed at `<host>/<slug>?_type=atom`.
    pub fn for_page(host_url: &str, title: &str) -> Self {
        Self::Collection {
            title: title.to_owned(),
            self_url: format!("{host_url}/{}?_type=atom", title_to_path(title)),
        }
    }
}

// ============================================================================
// FeedBuilder Implementation
// ============================================================================

/// Atom feed builder
pub struct FeedBuilder<'a> {
    config: &'a SiteConfig,
    host_url: &'a str,
    updated: Option<DateTime<Utc>>,
}

impl<'a> FeedBuilder<'a> {
    /// `host_url` is the scheme and host of the site, without trailing slash.
    pub fn new(config: &'a SiteConfig, host_url: &'a str) -> Self {
        Self {
            config,
            host_url: host_url.trim_end_matches('/'),
            updated: None,
        }
    }

    /// Fix the feed-level `<updated>` used when there are no entries.
    /// Defaults to the current time.
    pub fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.updated = Some(at);
        self
    }

    /// Build the feed document.
    ///
    /// Fails without output if any entry is missing a field.
    pub fn build(
        &self,
        identity: &FeedIdentity,
        author: &str,
        entries: &[FeedEntry],
    ) -> Result<String, FeedError> {
        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        let (title, self_url) = self.resolve_identity(identity);
        let updated = entries
            .iter()
            .map(|e| e.updated_at)
            .max()
            .or(self.updated)
            .unwrap_or_else(Utc::now);

        let xml = write_feed(&FeedHead {
            title: &title,
            self_url: &self_url,
            site_url: &format!("{}/", self.host_url),
            author,
            updated,
        }, &entries)
        .context("failed to write atom feed")?;

        Ok(xml)
    }

    fn resolve_identity(&self, identity: &FeedIdentity) -> (String, String) {
        match identity {
            FeedIdentity::SiteWide => (
                format!("{}: posts", self.config.service.title),
                format!("{}/{POSTS_PATH}?_type=atom", self.host_url),
            ),
            FeedIdentity::Collection { title, self_url } => (title.clone(), self_url.clone()),
        }
    }
}

/// Build the posts feed for a list of page records.
///
/// `title` selects a single page's feed; `None` gives the site-wide feed.
/// The feed author is the configured admin.
pub fn render_posts_atom(
    config: &SiteConfig,
    host_url: &str,
    title: Option<&str>,
    pages: &[PageRecord],
) -> Result<String, FeedError> {
    let builder = FeedBuilder::new(config, host_url);
    let identity = match title {
        Some(title) => FeedIdentity::for_page(builder.host_url, title),
        None => FeedIdentity::SiteWide,
    };
    let entries: Vec<_> = pages.iter().map(|p| p.to_entry(builder.host_url)).collect();

    builder.build(&identity, &config.admin.email, &entries)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Feed-level fields
struct FeedHead<'a> {
    title: &'a str,
    self_url: &'a str,
    site_url: &'a str,
    author: &'a str,
    updated: DateTime<Utc>,
}

fn atom_date(dt: DateTime<Utc>) -> String {
    format_iso_datetime(Some(&dt.naive_utc()))
}

fn write_feed(head: &FeedHead<'_>, entries: &[ValidEntry<'_>]) -> anyhow::Result<String> {
    let mut writer = create_xml_writer()?;

    write_start_elem(&mut writer, "feed", &[("xmlns", ATOM_NS)])?;
    write_text_element_with_attrs(&mut writer, "title", &[("type", "text")], head.title)?;
    write_text_element(&mut writer, "id", head.self_url)?;
    write_text_element(&mut writer, "updated", &atom_date(head.updated))?;
    write_empty_elem(&mut writer, "link", &[("href", head.site_url)])?;
    write_empty_elem(&mut writer, "link", &[("href", head.self_url), ("rel", "self")])?;
    write_author(&mut writer, head.author)?;
    write_text_element(&mut writer, "generator", GENERATOR)?;

    for entry in entries {
        write_entry(&mut writer, entry)?;
    }

    write_end_elem(&mut writer, "feed")?;
    finish_xml_writer(writer)
}

fn write_entry(writer: &mut XmlWriter, entry: &ValidEntry<'_>) -> anyhow::Result<()> {
    write_start_elem(writer, "entry", &[])?;
    write_text_element_with_attrs(writer, "title", &[("type", "text")], entry.title)?;
    write_text_element(writer, "id", entry.url)?;
    write_text_element(writer, "updated", &atom_date(entry.updated_at))?;
    write_empty_elem(writer, "link", &[("href", entry.url)])?;
    write_author(writer, entry.author)?;
    write_text_element_with_attrs(writer, "content", &[("type", "html")], entry.content_html)?;
    write_end_elem(writer, "entry")
}

fn write_author(writer: &mut XmlWriter, name: &str) -> anyhow::Result<()> {
    write_start_elem(writer, "author", &[])?;
    write_text_element(writer, "name", name)?;
    write_end_elem(writer, "author")
}

// ============================================================================
// Tests
// ============================================================================
