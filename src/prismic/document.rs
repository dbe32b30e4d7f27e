//! Wire types of the Prismic REST API

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

use crate::helpers::parse_publication_date;

/// A repository ref (content release); the master ref points at published content
#[derive(Debug, Clone, Deserialize)]
pub struct Ref {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// Response of the API entry point
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub refs: Vec<Ref>,
}

impl ApiInfo {
    pub fn master_ref(&self) -> Option<&Ref> {
        self.refs.iter().find(|r| r.is_master_ref)
    }
}

/// Response of `documents/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub results_size: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

/// An upstream document: metadata plus free-form `data`
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub last_publication_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Document {
    /// A string field of `data`, if present
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(|v| v.as_str())
    }

    /// A raw field of `data`, if present and not null
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name).filter(|v| !v.is_null())
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) => parse_publication_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
