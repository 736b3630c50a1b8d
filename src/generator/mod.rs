//! Document generators.

pub mod feed;

pub use feed::{FeedBuilder, FeedEntry, FeedError, FeedIdentity, PageRecord, render_posts_atom};
