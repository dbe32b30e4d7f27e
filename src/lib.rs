//! prismic-blog: a server-rendered blog backed by the Prismic content API
//!
//! The home page lists the first page of posts and grows one page at a time
//! by following the upstream `next_page` cursor; each post has its own page,
//! fetched on demand by UID.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod pagination;
pub mod prismic;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::{loader, PostDetail, PostPagination};
use pagination::Accumulator;
use prismic::PrismicClient;

/// The blog application: configuration plus a client for the content API
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Content API client
    pub client: PrismicClient,
}

impl Blog {
    /// Create a blog from `_config.yml` in a directory and the environment
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config = config::SiteConfig::discover(base_dir)?;
        Self::from_config(config)
    }

    /// Create a blog from an explicit configuration
    pub fn from_config(config: config::SiteConfig) -> Result<Self> {
        if config.api.endpoint.is_empty() {
            tracing::warn!(
                "No API endpoint configured (set {} or api.endpoint)",
                config::ENV_API_ENDPOINT
            );
        }
        let client = PrismicClient::new(&config.api)?;
        Ok(Self { config, client })
    }

    /// First page of posts and the cursor to the next one
    pub async fn load_initial(&self) -> error::Result<PostPagination> {
        loader::load_initial(&self.client, &self.config.api).await
    }

    /// A single post by UID
    pub async fn fetch_detail(&self, uid: &str) -> error::Result<PostDetail> {
        loader::fetch_detail(&self.client, &self.config.api, uid).await
    }

    /// An accumulator that continues from `cursor`
    pub fn accumulator(&self, cursor: Option<String>) -> Accumulator {
        Accumulator::new(cursor)
    }
}
