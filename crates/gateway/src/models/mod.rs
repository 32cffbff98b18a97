//! Typed models for the remote CMS payloads.
//!
//! Two families of types live here:
//! - content: ContentRecord and the embedded media bundle
//! - taxonomy: TaxonomyTerm and the ID-to-term join helpers

mod content;
mod taxonomy;

pub use content::{
    ContentRecord, EmbeddedBundle, FeaturedMedia, MediaDetails, MediaSize, MediaSizes,
    RenderedText, find_by_slug,
};
pub use taxonomy::{
    TaxonomyKind, TaxonomyTerm, is_category_taxonomy, is_tag_taxonomy, resolve_terms,
};
