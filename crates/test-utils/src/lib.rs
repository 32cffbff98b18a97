//! Pressroom test utilities.
//!
//! Builders for the WordPress REST API JSON payloads the gateway
//! integration tests serve from a mock server.

use serde_json::{Value, json};

/// Create a test record with default values.
pub fn test_record(kind: &str, id: u64, title: &str) -> TestRecord {
    TestRecord {
        id,
        kind: kind.to_string(),
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        date: "2025-01-08T10:30:00".to_string(),
        link: format!("https://cms.example/{id}"),
        excerpt: format!("<p>Excerpt for {title}</p>"),
        body: format!("<p>Body for <b>{title}</b></p>"),
        categories: Vec::new(),
        tags: Vec::new(),
        acf: None,
        term_groups: Vec::new(),
        media: None,
    }
}

/// A WordPress content-record fixture builder.
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub id: u64,
    pub kind: String,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub link: String,
    pub excerpt: String,
    pub body: String,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub acf: Option<Value>,
    pub term_groups: Vec<Vec<Value>>,
    pub media: Option<Value>,
}

impl TestRecord {
    /// Set the URL slug.
    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = slug.to_string();
        self
    }

    /// Set the publish date.
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    /// Set the flat category ID array.
    pub fn with_categories(mut self, ids: &[u64]) -> Self {
        self.categories = ids.to_vec();
        self
    }

    /// Set the flat tag ID array.
    pub fn with_tags(mut self, ids: &[u64]) -> Self {
        self.tags = ids.to_vec();
        self
    }

    /// Set the custom-field object.
    pub fn with_acf(mut self, acf: Value) -> Self {
        self.acf = Some(acf);
        self
    }

    /// Append an embedded term group.
    pub fn with_term_group(mut self, terms: &[(u64, &str, &str)]) -> Self {
        self.term_groups.push(
            terms
                .iter()
                .map(|(id, name, taxonomy)| term(*id, name, taxonomy))
                .collect(),
        );
        self
    }

    /// Attach embedded featured media.
    pub fn with_media(mut self, media: Value) -> Self {
        self.media = Some(media);
        self
    }

    /// Render the record as API JSON.
    pub fn build(&self) -> Value {
        let mut record = json!({
            "id": self.id,
            "type": self.kind,
            "slug": self.slug,
            "date": self.date,
            "link": self.link,
            "title": { "rendered": self.title },
            "excerpt": { "rendered": self.excerpt },
            "content": { "rendered": self.body },
            "categories": self.categories,
            "tags": self.tags,
        });

        if let Some(acf) = &self.acf {
            record["acf"] = acf.clone();
        }

        let mut embedded = serde_json::Map::new();
        if !self.term_groups.is_empty() {
            embedded.insert("wp:term".to_string(), json!(self.term_groups));
        }
        if let Some(media) = &self.media {
            embedded.insert("wp:featuredmedia".to_string(), json!([media]));
        }
        if !embedded.is_empty() {
            record["_embedded"] = Value::Object(embedded);
        }

        record
    }
}

/// A taxonomy term as the listing endpoints serve it.
pub fn term(id: u64, name: &str, taxonomy: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "taxonomy": taxonomy,
        "count": 1,
    })
}

/// A featured-media entry with size variants.
pub fn media_entry(direct: &str, large: Option<&str>, medium: Option<&str>) -> Value {
    let mut sizes = serde_json::Map::new();
    if let Some(url) = large {
        sizes.insert("large".to_string(), json!({ "source_url": url }));
    }
    if let Some(url) = medium {
        sizes.insert("medium".to_string(), json!({ "source_url": url }));
    }

    json!({
        "source_url": direct,
        "alt_text": "fixture image",
        "media_details": { "sizes": Value::Object(sizes) },
    })
}

/// A collection body from record builders.
pub fn collection(records: &[TestRecord]) -> Value {
    Value::Array(records.iter().map(TestRecord::build).collect())
}
