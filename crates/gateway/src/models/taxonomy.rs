//! Taxonomy terms and the ID-to-term join.
//!
//! Content records reference terms by ID; the full term list is fetched
//! separately and joined here. The join tolerates unresolved IDs by
//! dropping them — a stale reference must never block rendering.

use serde::{Deserialize, Serialize};

/// A taxonomy term: category, tag, or a content-type-specific kind such as
/// `portfolio_category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: String,

    /// Taxonomy kind string (`category`, `post_tag`, `portfolio_category`,
    /// ...).
    #[serde(default)]
    pub taxonomy: String,

    /// Number of records carrying this term, when the listing endpoint
    /// reports it.
    #[serde(default)]
    pub count: Option<u64>,
}

/// Taxonomy kinds with a dedicated listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Categories,
    Tags,
}

impl TaxonomyKind {
    /// REST path segment of the listing endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tags => "tags",
        }
    }
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Whether a taxonomy kind string names a category-like taxonomy.
pub fn is_category_taxonomy(taxonomy: &str) -> bool {
    taxonomy == "category" || taxonomy.ends_with("_category")
}

/// Whether a taxonomy kind string names a tag-like taxonomy.
pub fn is_tag_taxonomy(taxonomy: &str) -> bool {
    taxonomy == "post_tag" || taxonomy.ends_with("_tag")
}

/// Join an ID array against a fetched term list.
///
/// Unresolved IDs are dropped silently; the result preserves the input ID
/// order.
pub fn resolve_terms<'a>(ids: &[u64], terms: &'a [TaxonomyTerm]) -> Vec<&'a TaxonomyTerm> {
    ids.iter()
        .filter_map(|id| terms.iter().find(|term| term.id == *id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn term(id: u64, name: &str) -> TaxonomyTerm {
        TaxonomyTerm {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            taxonomy: "category".to_string(),
            count: None,
        }
    }

    #[test]
    fn resolve_drops_unresolved_ids() {
        let terms = vec![term(1, "Strategy"), term(2, "Leadership")];
        let resolved = resolve_terms(&[1, 2, 999], &terms);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, "Strategy");
        assert_eq!(resolved[1].name, "Leadership");
    }

    #[test]
    fn resolve_preserves_input_order() {
        let terms = vec![term(1, "Strategy"), term(2, "Leadership")];
        let resolved = resolve_terms(&[2, 1], &terms);

        assert_eq!(resolved[0].id, 2);
        assert_eq!(resolved[1].id, 1);
    }

    #[test]
    fn resolve_empty_inputs() {
        assert!(resolve_terms(&[], &[term(1, "Strategy")]).is_empty());
        assert!(resolve_terms(&[1], &[]).is_empty());
    }

    #[test]
    fn category_taxonomy_kinds() {
        assert!(is_category_taxonomy("category"));
        assert!(is_category_taxonomy("portfolio_category"));
        assert!(!is_category_taxonomy("post_tag"));
        assert!(!is_category_taxonomy("categories"));
    }

    #[test]
    fn tag_taxonomy_kinds() {
        assert!(is_tag_taxonomy("post_tag"));
        assert!(is_tag_taxonomy("portfolio_tag"));
        assert!(!is_tag_taxonomy("category"));
    }

    #[test]
    fn kind_path_segments() {
        assert_eq!(TaxonomyKind::Categories.path_segment(), "categories");
        assert_eq!(TaxonomyKind::Tags.to_string(), "tags");
    }

    #[test]
    fn term_decodes_without_count() {
        let term: TaxonomyTerm = serde_json::from_value(serde_json::json!({
            "id": 5, "name": "Digital", "slug": "digital", "taxonomy": "category"
        }))
        .unwrap();
        assert_eq!(term.id, 5);
        assert!(term.count.is_none());
    }
}
