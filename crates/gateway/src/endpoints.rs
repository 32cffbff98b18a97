//! Content types and the candidate endpoint chain.
//!
//! Custom content types are served by installations of wildly varying
//! configuration: the dedicated endpoint may not exist, the content may
//! live under a category or tag of the same name instead. A fetch
//! therefore walks an explicit ordered list of candidate URLs and accepts
//! the first that yields records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::models::TaxonomyKind;
use crate::query::CollectionQuery;

/// Content types known to the remote CMS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Posts,
    Pages,
    Portfolio,
    Services,
    /// Consultant profiles (the `beraters` custom type).
    Consultants,
    /// Any other custom type, addressed by its endpoint slug.
    Custom(String),
}

impl ContentType {
    /// REST path segment of the primary endpoint.
    pub fn slug(&self) -> &str {
        match self {
            Self::Posts => "posts",
            Self::Pages => "pages",
            Self::Portfolio => "portfolio",
            Self::Services => "services",
            Self::Consultants => "beraters",
            Self::Custom(slug) => slug,
        }
    }

    /// Whether a fetch for this type chases the fallback chain.
    ///
    /// Built-in collections resolve via their primary endpoint only;
    /// filtering `posts` by a `posts` category would be meaningless.
    fn chases_fallbacks(&self) -> bool {
        !matches!(self, Self::Posts | Self::Pages)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl From<&str> for ContentType {
    fn from(slug: &str) -> Self {
        match slug {
            "posts" => Self::Posts,
            "pages" => Self::Pages,
            "portfolio" => Self::Portfolio,
            "services" => Self::Services,
            "beraters" => Self::Consultants,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Ok(Self::from(slug.as_str()))
    }
}

/// Ordered candidate URLs for a collection fetch.
///
/// The chain is strict and lazy: callers stop at the first candidate that
/// yields records, so later entries are never contacted when an earlier
/// one succeeds.
pub fn candidates(base: &Url, content_type: &ContentType, query: &CollectionQuery) -> Vec<Url> {
    let mut urls = Vec::with_capacity(4);

    let mut primary = join_segment(base, content_type.slug());
    query.apply_to(&mut primary);
    urls.push(primary);

    if content_type.chases_fallbacks() {
        let slug = content_type.slug();

        let mut by_category = join_segment(base, ContentType::Posts.slug());
        query.clone().with_categories(slug).apply_to(&mut by_category);
        urls.push(by_category);

        let mut by_tag = join_segment(base, ContentType::Posts.slug());
        query.clone().with_tags(slug).apply_to(&mut by_tag);
        urls.push(by_tag);

        let mut by_search = join_segment(base, ContentType::Posts.slug());
        query
            .clone()
            .with_search(slug)
            .with_orderby("relevance")
            .apply_to(&mut by_search);
        urls.push(by_search);
    }

    urls
}

/// URL of a single-resource lookup. No fallback chain; exact or nothing.
pub fn single(base: &Url, content_type: &ContentType, id: u64) -> Url {
    let mut url = join_segment(base, content_type.slug());
    url = join_segment(&url, &id.to_string());
    url.query_pairs_mut().append_pair("_embed", "true");
    url
}

/// URL of one page of a taxonomy term listing.
pub fn taxonomy(base: &Url, kind: TaxonomyKind, page: u32, per_page: u32) -> Url {
    let mut url = join_segment(base, kind.path_segment());
    url.query_pairs_mut()
        .append_pair("per_page", &per_page.to_string())
        .append_pair("page", &page.to_string());
    url
}

/// Append a path segment, tolerating a trailing slash on the base.
///
/// The base URL is validated at gateway construction, so the
/// cannot-be-a-base case is unreachable here and degrades to returning
/// the base unchanged.
fn join_segment(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().push(segment);
    }
    url
}
