//! Utility modules shared by the renderers.

pub mod date;
pub mod hash;
pub mod highlight;
pub mod html;
pub mod log;
pub mod slug;
pub mod user;
pub mod xml;
