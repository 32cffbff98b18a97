//! Collection query options.
//!
//! A query is a plain description of filters and sort order; unset fields
//! are omitted from the outgoing URL entirely, so no absent-value markers
//! ever reach the wire.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DEFAULT_PER_PAGE;

/// Sort direction for collection queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value of the `order` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query options for collection fetches.
///
/// `per_page`, `orderby`, and `order` have remote-API defaults that are
/// always sent explicitly; the filter fields (`page`, `categories`,
/// `tags`, `search`) are sent only when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionQuery {
    /// Maximum records per page (default 10).
    pub per_page: Option<u32>,

    /// Page number, 1-indexed.
    pub page: Option<u32>,

    /// Comma-joined category filter.
    pub categories: Option<String>,

    /// Comma-joined tag filter.
    pub tags: Option<String>,

    /// Free-text search query.
    pub search: Option<String>,

    /// Sort key (default `date`).
    pub orderby: Option<String>,

    /// Sort direction (default descending).
    pub order: Option<SortOrder>,
}

impl CollectionQuery {
    /// Limit the number of records per page.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Request a specific page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Filter by comma-joined category IDs or slugs.
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    /// Filter by comma-joined tag IDs or slugs.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Filter by a free-text search query.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sort by a specific key.
    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    /// Set the sort direction.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Append this query to a URL.
    ///
    /// `_embed` is always requested so media and taxonomy terms arrive
    /// inline.
    pub fn apply_to(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("_embed", "true");
        pairs.append_pair(
            "per_page",
            &self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string(),
        );
        if let Some(page) = self.page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(categories) = &self.categories {
            pairs.append_pair("categories", categories);
        }
        if let Some(tags) = &self.tags {
            pairs.append_pair("tags", tags);
        }
        if let Some(search) = &self.search {
            pairs.append_pair("search", search);
        }
        pairs.append_pair("orderby", self.orderby.as_deref().unwrap_or("date"));
        pairs.append_pair("order", self.order.unwrap_or_default().as_str());
    }
}
