//! Content record models.
//!
//! Field names mirror the remote API's JSON: `title`/`excerpt`/`content`
//! are rendered-HTML wrappers, `_embedded` optionally carries resolved
//! media and taxonomy terms, and `acf` holds free-form custom fields.
//! Every field beyond `id` is defaulted so that the sparser shapes served
//! by fallback endpoints still decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::taxonomy::TaxonomyTerm;

/// A block of rendered HTML from the CMS.
///
/// Never assume the content is plain text; run it through
/// [`crate::text::strip_markup`] or [`crate::text::sanitize_markup`] first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedText {
    #[serde(default)]
    pub rendered: String,
}

impl RenderedText {
    /// Wrap a string as rendered markup.
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }
}

/// One resolution variant of a featured image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaSize {
    #[serde(default)]
    pub source_url: String,
}

/// Registered size variants of a featured image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaSizes {
    pub large: Option<MediaSize>,
    pub medium: Option<MediaSize>,
    pub full: Option<MediaSize>,
}

/// Media metadata carried inside an embedded media entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub sizes: MediaSizes,
}

/// A featured-media entry from the embedded bundle.
///
/// The API substitutes an error object for entries the requester may not
/// see; the blanket defaults decode those to an entry with an empty
/// `source_url`, which resolution then skips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub media_details: MediaDetails,
}

/// Inline expansion of referenced resources, returned when `_embed` is
/// requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddedBundle {
    /// Resolved featured media (`wp:featuredmedia`).
    #[serde(rename = "wp:featuredmedia", default)]
    pub media: Vec<FeaturedMedia>,

    /// Resolved taxonomy terms (`wp:term`), grouped per taxonomy.
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<TaxonomyTerm>>,
}

/// A generic unit of content: post, portfolio item, consultant profile,
/// service, or page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Identifier, unique per content type.
    pub id: u64,

    #[serde(default)]
    pub slug: String,

    /// Publish timestamp in the CMS's local format
    /// (`2025-01-08T10:30:00`).
    #[serde(default)]
    pub date: String,

    /// Canonical URL on the CMS site.
    #[serde(default)]
    pub link: String,

    /// The record's content type (`post`, `page`, `portfolio`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub title: RenderedText,

    #[serde(default)]
    pub excerpt: RenderedText,

    #[serde(rename = "content", default)]
    pub body: RenderedText,

    /// Core category term IDs.
    #[serde(default)]
    pub categories: Vec<u64>,

    /// Core tag term IDs.
    #[serde(default)]
    pub tags: Vec<u64>,

    /// Type-specific category term IDs (the `portfolio_category`
    /// taxonomy).
    #[serde(default)]
    pub portfolio_categories: Vec<u64>,

    /// ID of the featured media attachment, 0 when none is set.
    #[serde(default)]
    pub featured_media: u64,

    /// Free-form custom fields (the `acf` object). Absent on
    /// fallback-sourced records; the API serves `false` instead of an
    /// object when the field plugin is inactive, which decodes to `None`.
    #[serde(
        rename = "acf",
        default,
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom: Option<Map<String, Value>>,

    /// Inline media/term expansion, present when `_embed` was requested.
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub embedded: Option<EmbeddedBundle>,
}

impl ContentRecord {
    /// A string-valued custom field, if present and non-empty.
    pub fn custom_str(&self, key: &str) -> Option<&str> {
        match self.custom.as_ref()?.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Accept a JSON object, map anything else to `None`.
fn object_or_none<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

/// Find a record by its URL slug within a fetched collection.
pub fn find_by_slug<'a>(records: &'a [ContentRecord], slug: &str) -> Option<&'a ContentRecord> {
    records.iter().find(|record| record.slug == slug)
}
