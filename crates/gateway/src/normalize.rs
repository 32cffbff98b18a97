//! Response normalization.
//!
//! The CMS reports taxonomy assignments in two places: flat ID arrays on
//! the record and resolved term objects inside the embedded bundle.
//! Fallback sources often populate only the bundle, so the flat arrays
//! are rebuilt from it here. All helpers degrade to absent/empty values
//! on malformed records.

use crate::models::{
    ContentRecord, TaxonomyTerm, is_category_taxonomy, is_tag_taxonomy, resolve_terms,
};

/// Custom fields that mark a record as portfolio-shaped.
const PORTFOLIO_FIELDS: &[&str] = &["project_url", "client_name", "project_type"];

/// Flatten embedded taxonomy terms into the record's flat ID arrays.
///
/// Core `category` terms land in `categories`, type-specific `*_category`
/// terms in `portfolio_categories`, and tag-like terms in `tags`. IDs the
/// payload already carried are kept; flattening never duplicates them.
pub fn normalize_record(record: &mut ContentRecord) {
    let Some(embedded) = record.embedded.as_ref() else {
        return;
    };

    let mut categories = Vec::new();
    let mut portfolio_categories = Vec::new();
    let mut tags = Vec::new();

    for term in embedded.terms.iter().flatten() {
        if term.taxonomy == "category" {
            categories.push(term.id);
        } else if is_category_taxonomy(&term.taxonomy) {
            portfolio_categories.push(term.id);
        } else if is_tag_taxonomy(&term.taxonomy) {
            tags.push(term.id);
        }
    }

    merge_ids(&mut record.categories, categories);
    merge_ids(&mut record.portfolio_categories, portfolio_categories);
    merge_ids(&mut record.tags, tags);
}

fn merge_ids(existing: &mut Vec<u64>, found: Vec<u64>) {
    for id in found {
        if !existing.contains(&id) {
            existing.push(id);
        }
    }
}

/// Largest available featured-image URL.
///
/// Prefers the registered `large`, `medium`, and `full` size variants in
/// that order, then the media's own direct URL. `None` when the record
/// carries no usable embedded media.
pub fn resolve_featured_image(record: &ContentRecord) -> Option<&str> {
    let media = record.embedded.as_ref()?.media.first()?;
    let sizes = &media.media_details.sizes;

    for size in [&sizes.large, &sizes.medium, &sizes.full] {
        if let Some(size) = size
            && !size.source_url.is_empty()
        {
            return Some(&size.source_url);
        }
    }

    if media.source_url.is_empty() {
        None
    } else {
        Some(&media.source_url)
    }
}

/// Alt text of the featured image, when embedded and non-empty.
pub fn featured_image_alt(record: &ContentRecord) -> Option<&str> {
    let media = record.embedded.as_ref()?.media.first()?;
    if media.alt_text.is_empty() {
        None
    } else {
        Some(&media.alt_text)
    }
}

/// Display label for a record: the `project_type` custom field when
/// present, else the first embedded category name.
pub fn display_kind(record: &ContentRecord) -> Option<String> {
    if let Some(kind) = record.custom_str("project_type") {
        return Some(kind.to_string());
    }

    record
        .embedded
        .as_ref()?
        .terms
        .iter()
        .flatten()
        .find(|term| is_category_taxonomy(&term.taxonomy) && !term.name.is_empty())
        .map(|term| term.name.clone())
}

/// Whether a record looks like a portfolio entry.
///
/// Fallback endpoints serve generic posts; consumers that only want
/// project records filter with this.
pub fn is_portfolio_shaped(record: &ContentRecord) -> bool {
    record.kind == "portfolio"
        || PORTFOLIO_FIELDS
            .iter()
            .any(|field| record.custom_str(field).is_some())
}

/// Distinct category names across a collection, insertion-ordered.
///
/// Embedded term names come first; IDs without an embedded name are
/// resolved against `terms`, unresolved IDs are dropped.
pub fn collect_category_names(records: &[ContentRecord], terms: &[TaxonomyTerm]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for record in records {
        if let Some(embedded) = &record.embedded {
            for term in embedded.terms.iter().flatten() {
                if is_category_taxonomy(&term.taxonomy) && !term.name.is_empty() {
                    push_unique(&mut names, &term.name);
                }
            }
        }

        for resolved in resolve_terms(&record.categories, terms)
            .into_iter()
            .chain(resolve_terms(&record.portfolio_categories, terms))
        {
            if !resolved.name.is_empty() {
                push_unique(&mut names, &resolved.name);
            }
        }
    }

    names
}

/// Distinct `specialization` custom-field values across a collection,
/// insertion-ordered. Consultant profiles carry this field.
pub fn specializations(records: &[ContentRecord]) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for record in records {
        if let Some(value) = record.custom_str("specialization") {
            push_unique(&mut values, value);
        }
    }
    values
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ContentRecord {
        serde_json::from_value(json).unwrap()
    }

    fn term(id: u64, name: &str, taxonomy: &str) -> TaxonomyTerm {
        TaxonomyTerm {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            taxonomy: taxonomy.to_string(),
            count: None,
        }
    }

    #[test]
    fn normalize_fills_arrays_from_embedded_terms() {
        let mut rec = record(serde_json::json!({
            "id": 1,
            "_embedded": {
                "wp:term": [
                    [
                        { "id": 3, "name": "Projects", "slug": "projects", "taxonomy": "portfolio_category" },
                        { "id": 4, "name": "Strategy", "slug": "strategy", "taxonomy": "category" }
                    ],
                    [{ "id": 9, "name": "Agile", "slug": "agile", "taxonomy": "portfolio_tag" }]
                ]
            }
        }));

        normalize_record(&mut rec);

        assert_eq!(rec.categories, vec![4]);
        assert_eq!(rec.portfolio_categories, vec![3]);
        assert_eq!(rec.tags, vec![9]);
    }

    #[test]
    fn normalize_keeps_existing_ids_without_duplicates() {
        let mut rec = record(serde_json::json!({
            "id": 1,
            "categories": [4, 8],
            "_embedded": {
                "wp:term": [[
                    { "id": 4, "name": "Strategy", "slug": "strategy", "taxonomy": "category" },
                    { "id": 5, "name": "Digital", "slug": "digital", "taxonomy": "category" }
                ]]
            }
        }));

        normalize_record(&mut rec);

        assert_eq!(rec.categories, vec![4, 8, 5]);
    }

    #[test]
    fn normalize_without_bundle_is_noop() {
        let mut rec = record(serde_json::json!({ "id": 1, "categories": [2] }));
        normalize_record(&mut rec);
        assert_eq!(rec.categories, vec![2]);
        assert!(rec.tags.is_empty());
    }

    #[test]
    fn featured_image_prefers_large_then_medium() {
        let rec = record(serde_json::json!({
            "id": 1,
            "_embedded": {
                "wp:featuredmedia": [{
                    "source_url": "https://cms.example/direct.jpg",
                    "media_details": { "sizes": {
                        "large": { "source_url": "https://cms.example/large.jpg" },
                        "medium": { "source_url": "https://cms.example/medium.jpg" }
                    }}
                }]
            }
        }));

        assert_eq!(
            resolve_featured_image(&rec),
            Some("https://cms.example/large.jpg")
        );
    }

    #[test]
    fn featured_image_falls_back_to_direct_url() {
        let rec = record(serde_json::json!({
            "id": 1,
            "_embedded": {
                "wp:featuredmedia": [{ "source_url": "https://cms.example/direct.jpg" }]
            }
        }));

        assert_eq!(
            resolve_featured_image(&rec),
            Some("https://cms.example/direct.jpg")
        );
    }

    #[test]
    fn featured_image_absent_without_media() {
        let rec = record(serde_json::json!({ "id": 1 }));
        assert!(resolve_featured_image(&rec).is_none());

        // error-object entry decodes to an empty URL, which is skipped
        let rec = record(serde_json::json!({
            "id": 1,
            "_embedded": { "wp:featuredmedia": [{ "code": "rest_forbidden" }] }
        }));
        assert!(resolve_featured_image(&rec).is_none());
    }

    #[test]
    fn alt_text_when_present() {
        let rec = record(serde_json::json!({
            "id": 1,
            "_embedded": {
                "wp:featuredmedia": [{ "source_url": "x", "alt_text": "Team workshop" }]
            }
        }));
        assert_eq!(featured_image_alt(&rec), Some("Team workshop"));
    }

    #[test]
    fn display_kind_prefers_custom_field() {
        let rec = record(serde_json::json!({
            "id": 1,
            "acf": { "project_type": "Transformation" },
            "_embedded": {
                "wp:term": [[{ "id": 1, "name": "Strategy", "slug": "s", "taxonomy": "category" }]]
            }
        }));
        assert_eq!(display_kind(&rec).as_deref(), Some("Transformation"));
    }

    #[test]
    fn display_kind_falls_back_to_category_name() {
        let rec = record(serde_json::json!({
            "id": 1,
            "_embedded": {
                "wp:term": [[{ "id": 1, "name": "Strategy", "slug": "s", "taxonomy": "category" }]]
            }
        }));
        assert_eq!(display_kind(&rec).as_deref(), Some("Strategy"));
    }

    #[test]
    fn display_kind_absent_without_sources() {
        let rec = record(serde_json::json!({ "id": 1 }));
        assert!(display_kind(&rec).is_none());
    }

    #[test]
    fn portfolio_shape_by_type_or_custom_fields() {
        assert!(is_portfolio_shaped(&record(
            serde_json::json!({ "id": 1, "type": "portfolio" })
        )));
        assert!(is_portfolio_shaped(&record(
            serde_json::json!({ "id": 2, "type": "post", "acf": { "client_name": "Acme" } })
        )));
        assert!(!is_portfolio_shaped(&record(
            serde_json::json!({ "id": 3, "type": "post" })
        )));
    }

    #[test]
    fn category_names_deduplicated_in_order() {
        let records = vec![
            record(serde_json::json!({
                "id": 1,
                "_embedded": {
                    "wp:term": [[
                        { "id": 1, "name": "Strategy", "slug": "s", "taxonomy": "category" },
                        { "id": 2, "name": "Digital", "slug": "d", "taxonomy": "portfolio_category" }
                    ]]
                }
            })),
            record(serde_json::json!({
                "id": 2,
                "categories": [1, 7],
                "_embedded": { "wp:term": [] }
            })),
        ];
        let terms = vec![term(1, "Strategy", "category"), term(7, "Leadership", "category")];

        assert_eq!(
            collect_category_names(&records, &terms),
            vec!["Strategy", "Digital", "Leadership"]
        );
    }

    #[test]
    fn specializations_from_consultant_profiles() {
        let records = vec![
            record(serde_json::json!({ "id": 1, "acf": { "specialization": "Digital Transformation" } })),
            record(serde_json::json!({ "id": 2, "acf": { "specialization": "Financial Strategy" } })),
            record(serde_json::json!({ "id": 3, "acf": { "specialization": "Digital Transformation" } })),
            record(serde_json::json!({ "id": 4 })),
        ];

        assert_eq!(
            specializations(&records),
            vec!["Digital Transformation", "Financial Strategy"]
        );
    }
}
