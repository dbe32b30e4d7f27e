//! Client for the Prismic v2 REST API
//!
//! Only the read endpoints used by the blog are covered: the API entry point
//! (to resolve the master ref), `documents/search`, and following the
//! `next_page` cursor that search responses carry.

mod document;
mod predicate;
pub mod richtext;

pub use document::{ApiInfo, Document, Ref, SearchResponse};
pub use predicate::{Predicate, SearchQuery};

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{BlogError, Result};

/// Anything that can resolve a pagination cursor into a page of documents.
///
/// The pagination accumulator depends on this trait rather than on the HTTP
/// client so it can be driven by stubs in tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the search page that `cursor` (a full URL) points at
    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse>;
}

/// Client for one Prismic repository
#[derive(Debug, Clone)]
pub struct PrismicClient {
    /// API entry point, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    access_token: Option<String>,
    client: Client,
}

impl PrismicClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            client,
        })
    }

    /// Fetch the API entry point and return the master ref
    pub async fn master_ref(&self) -> Result<String> {
        let mut url = self.parse_url(&self.endpoint)?;
        self.add_token(&mut url);

        let info: ApiInfo = self.get_json(url).await?;
        info.master_ref()
            .map(|r| r.reference.clone())
            .ok_or(BlogError::NoMasterRef)
    }

    /// Run a search against the master ref
    pub async fn query(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let master_ref = self.master_ref().await?;

        let mut url = self.parse_url(&format!("{}/documents/search", self.endpoint))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", &master_ref);
            for (key, value) in query.to_params() {
                pairs.append_pair(key, &value);
            }
        }
        self.add_token(&mut url);

        tracing::debug!("Querying {}", query.q());
        self.get_json(url).await
    }

    /// Fetch a single document of `doc_type` by UID
    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        self.get_single(vec![Predicate::uid(doc_type, uid)], doc_type, uid).await
    }

    /// Fetch a single document of `doc_type` by document id
    pub async fn get_by_id(&self, doc_type: &str, id: &str) -> Result<Document> {
        let predicates = vec![Predicate::document_type(doc_type), Predicate::id(id)];
        self.get_single(predicates, doc_type, id).await
    }

    async fn get_single(&self, predicates: Vec<Predicate>, doc_type: &str, key: &str) -> Result<Document> {
        let query = SearchQuery::new(predicates).page_size(1);
        let response = self.query(&query).await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| BlogError::NotFound {
                doc_type: doc_type.to_string(),
                uid: key.to_string(),
            })
    }

    fn parse_url(&self, raw: &str) -> Result<Url> {
        Url::parse(raw).map_err(|e| BlogError::InvalidEndpoint {
            url: raw.to_string(),
            message: e.to_string(),
        })
    }

    /// Append the access token unless the URL already carries one
    fn add_token(&self, url: &mut Url) {
        if let Some(token) = &self.access_token {
            if !url.query_pairs().any(|(k, _)| k == "access_token") {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let display_url = redact(&url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Upstream returned {} for {}", status, display_url);
            return Err(BlogError::Status {
                status,
                url: display_url,
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PageSource for PrismicClient {
    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse> {
        let mut url = Url::parse(cursor).map_err(|e| BlogError::InvalidCursor(e.to_string()))?;
        self.add_token(&mut url);

        tracing::debug!("Following cursor {}", redact(&url));
        self.get_json(url).await
    }
}

/// URL without its access token, safe for logs and error messages
fn redact(url: &Url) -> String {
    let mut clean = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "access_token")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(pairs);
    }
    clean.to_string()
}

/// Cursor that can be handed to browsers.
///
/// Upstream `next_page` URLs repeat every request parameter, the access token
/// included. The token is added back by [`PageSource::fetch_page`].
pub fn public_cursor(cursor: &str) -> String {
    match Url::parse(cursor) {
        Ok(url) => redact(&url),
        Err(_) => cursor.to_string(),
    }
}
