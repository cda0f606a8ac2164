//! Portfolio content and where it is kept.
//!
//! The whole page (profile, gallery, social links, commission status) is a
//! single JSON document stored under one key in a small key-value store.

mod content;
mod store;

pub use content::{CommissionStatus, GalleryItem, PortfolioContent, SocialLink};
pub use store::{CONTENT_KEY, ContentError, ContentStore, FileStore, KeyValueStore, MemoryStore};
