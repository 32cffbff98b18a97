//! Pressroom content gateway.
//!
//! A typed, read-only client for a headless WordPress REST API:
//! - ContentGateway: collection/single/taxonomy fetches and cross-type
//!   search, with a fallback endpoint chain per custom content type
//! - Models: ContentRecord, TaxonomyTerm, and the embedded media bundle
//! - Normalization: embedded-term flattening, featured-image resolution
//! - Text helpers: markup stripping, sanitization, truncation, dates
//!
//! The remote CMS is the sole authority; nothing is cached, persisted,
//! or written back.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod normalize;
pub mod query;
pub mod text;

mod gateway;

pub use config::GatewayConfig;
pub use endpoints::ContentType;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{ContentGateway, SearchBucket, SearchResults};
pub use models::{
    ContentRecord, EmbeddedBundle, FeaturedMedia, RenderedText, TaxonomyKind, TaxonomyTerm,
};
pub use query::{CollectionQuery, SortOrder};
