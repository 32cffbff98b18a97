//! Content gateway service.
//!
//! Fetches collections and single records from the remote CMS, walking
//! the candidate endpoint chain, and normalizes every record before it
//! reaches a caller. The service is stateless: nothing is cached or
//! retained between calls, and the CMS stays the sole authority.

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::endpoints::{self, ContentType};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{ContentRecord, TaxonomyKind, TaxonomyTerm};
use crate::normalize;
use crate::query::CollectionQuery;

/// Terms fetched per taxonomy listing page.
const TAXONOMY_PAGE_SIZE: u32 = 100;

/// Upper bound on taxonomy pages fetched per listing.
const TAXONOMY_MAX_PAGES: u32 = 10;

/// Records requested per content type by [`ContentGateway::search`].
const SEARCH_PER_TYPE: u32 = 5;

/// Read-only client for the remote CMS.
///
/// Cheap to clone; the inner HTTP client is reference-counted.
#[derive(Clone)]
pub struct ContentGateway {
    base: Url,
    client: Client,
}

/// Per-content-type slice of an aggregate search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBucket {
    pub content_type: ContentType,
    pub records: Vec<ContentRecord>,
}

/// Aggregate result of a cross-type search.
///
/// Buckets preserve the requested content-type order; a content type
/// whose fetch failed contributes an empty bucket rather than failing
/// the aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub buckets: Vec<SearchBucket>,
    pub total: usize,
}

impl SearchResults {
    /// Records found for one content type.
    pub fn records_for(&self, content_type: &ContentType) -> &[ContentRecord] {
        self.buckets
            .iter()
            .find(|bucket| bucket.content_type == *content_type)
            .map(|bucket| bucket.records.as_slice())
            .unwrap_or_default()
    }
}

impl ContentGateway {
    /// Create a gateway from configuration.
    ///
    /// Fails when the configured base URL cannot be parsed or cannot
    /// carry path segments.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let base = Url::parse(&config.api_base_url)
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{}: {e}", config.api_base_url)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(config.api_base_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(GatewayError::Network)?;

        Ok(Self { base, client })
    }

    /// Gateway against the production CMS with default settings.
    pub fn with_defaults() -> GatewayResult<Self> {
        Self::new(GatewayConfig::default())
    }

    /// Fetch a normalized collection of records.
    ///
    /// Candidate endpoints are tried in priority order; the first
    /// returning a non-empty decodable collection wins. Both an empty
    /// response and a failed request advance the chain; only request
    /// failures are logged as anomalies. When the chain is exhausted the
    /// caller gets [`GatewayError::NotFound`], unless the final candidate
    /// failed in transport, in which case that failure surfaces so
    /// "no content" and "CMS unreachable" stay distinguishable.
    pub async fn fetch_collection(
        &self,
        content_type: &ContentType,
        query: &CollectionQuery,
    ) -> GatewayResult<Vec<ContentRecord>> {
        let mut last_transport_err: Option<GatewayError> = None;

        for url in endpoints::candidates(&self.base, content_type, query) {
            last_transport_err = None;

            match self.fetch_array(&url).await {
                Ok(Some(values)) if !values.is_empty() => {
                    let mut records = decode_records(values);
                    if records.is_empty() {
                        debug!(endpoint = %url, "candidate had no decodable records");
                        continue;
                    }
                    records.iter_mut().for_each(normalize::normalize_record);
                    return Ok(records);
                }
                Ok(Some(_)) => {
                    debug!(endpoint = %url, "candidate returned no records");
                }
                Ok(None) => {
                    debug!(endpoint = %url, "candidate returned an unusable response");
                }
                Err(e) => {
                    warn!(endpoint = %url, error = %e, "candidate request failed");
                    last_transport_err = Some(e);
                }
            }
        }

        match last_transport_err {
            Some(err) => Err(err),
            None => Err(GatewayError::NotFound {
                content_type: content_type.to_string(),
            }),
        }
    }

    /// Fetch exactly one record by identifier. No fallback chain.
    pub async fn fetch_single(
        &self,
        content_type: &ContentType,
        id: u64,
    ) -> GatewayResult<ContentRecord> {
        let url = endpoints::single(&self.base, content_type, id);
        debug!(endpoint = %url, "requesting single record");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(GatewayError::from_request)?;

        if !response.status().is_success() {
            return Err(GatewayError::NotFound {
                content_type: content_type.to_string(),
            });
        }

        let body = response.text().await.map_err(GatewayError::from_request)?;
        let mut record: ContentRecord = serde_json::from_str(&body)?;
        normalize::normalize_record(&mut record);
        Ok(record)
    }

    /// Fetch the full term list for a taxonomy kind.
    ///
    /// Paginates internally until a short page arrives. Degrades to the
    /// terms collected so far (possibly none) on any failure: taxonomy
    /// labels are cosmetic, missing content is not.
    pub async fn fetch_taxonomy_terms(&self, kind: TaxonomyKind) -> Vec<TaxonomyTerm> {
        let mut terms: Vec<TaxonomyTerm> = Vec::new();

        for page in 1..=TAXONOMY_MAX_PAGES {
            let url = endpoints::taxonomy(&self.base, kind, page, TAXONOMY_PAGE_SIZE);

            let values = match self.fetch_array(&url).await {
                Ok(Some(values)) => values,
                Ok(None) => {
                    warn!(endpoint = %url, "taxonomy listing returned an unusable response");
                    break;
                }
                Err(e) => {
                    warn!(endpoint = %url, error = %e, "taxonomy listing failed");
                    break;
                }
            };

            let page_len = values.len();
            terms.extend(
                values
                    .into_iter()
                    .filter_map(|value| serde_json::from_value::<TaxonomyTerm>(value).ok()),
            );

            if (page_len as u32) < TAXONOMY_PAGE_SIZE {
                break;
            }
        }

        terms
    }

    /// Search across content types concurrently.
    ///
    /// Sub-fetches run independently and are joined after all have
    /// settled; one content type failing never cancels or fails the
    /// others. All types failing yields an empty aggregate.
    pub async fn search(&self, query: &str, content_types: &[ContentType]) -> SearchResults {
        let mut tasks = JoinSet::new();

        for (index, content_type) in content_types.iter().cloned().enumerate() {
            let gateway = self.clone();
            let search_query = CollectionQuery::default()
                .with_search(query)
                .with_per_page(SEARCH_PER_TYPE);

            tasks.spawn(async move {
                let records = match gateway.fetch_collection(&content_type, &search_query).await {
                    Ok(records) => records,
                    Err(e) => {
                        debug!(content_type = %content_type, error = %e, "search bucket failed");
                        Vec::new()
                    }
                };
                (index, content_type, records)
            });
        }

        let mut slots: Vec<Option<SearchBucket>> =
            content_types.iter().map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, content_type, records)) => {
                    slots[index] = Some(SearchBucket {
                        content_type,
                        records,
                    });
                }
                Err(e) => warn!(error = %e, "search task aborted"),
            }
        }

        let buckets: Vec<SearchBucket> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| SearchBucket {
                    content_type: content_types[index].clone(),
                    records: Vec::new(),
                })
            })
            .collect();

        let total = buckets.iter().map(|bucket| bucket.records.len()).sum();
        SearchResults { buckets, total }
    }

    /// Issue one GET and decode the body as a JSON array.
    ///
    /// `Ok(None)` covers every response that terminates a candidate
    /// without being a transport failure: non-success status, an
    /// undecodable body, or a top-level shape other than an array.
    async fn fetch_array(&self, url: &Url) -> GatewayResult<Option<Vec<Value>>> {
        debug!(endpoint = %url, "requesting collection");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(GatewayError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            debug!(endpoint = %url, status = %status, "non-success status");
            return Ok(None);
        }

        let body = response.text().await.map_err(GatewayError::from_request)?;
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(values)) => Ok(Some(values)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!(endpoint = %url, error = %e, "undecodable body treated as zero results");
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for ContentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGateway")
            .field("base", &self.base.as_str())
            .finish()
    }
}

/// Decode records individually so one malformed record never blocks the
/// rest of the collection.
fn decode_records(values: Vec<Value>) -> Vec<ContentRecord> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ContentRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "dropping undecodable record");
                None
            }
        })
        .collect()
}
