//! Post models built from upstream documents

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};
use crate::helpers::{count_words, post_path};
use crate::prismic::{richtext, Document, SearchResponse};

/// A post as listed on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Upstream document id
    pub id: String,

    /// Routed identifier
    pub uid: Option<String>,

    /// First upstream slug
    pub slug: Option<String>,

    /// Raw first-publication timestamp; formatted only by the view layer
    pub first_publication_date: Option<DateTime<FixedOffset>>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Build a summary from a list result
    pub fn from_document(doc: &Document) -> Result<Self> {
        let title = doc
            .text_field("title")
            .ok_or_else(|| BlogError::missing(&doc.id, "title"))?;

        Ok(Self {
            id: doc.id.clone(),
            uid: doc.uid.clone(),
            slug: doc.slugs.first().cloned(),
            first_publication_date: doc.first_publication_date.or(doc.last_publication_date),
            title: title.to_string(),
            subtitle: doc.text_field("subtitle").unwrap_or_default().to_string(),
            author: doc.text_field("author").unwrap_or_default().to_string(),
        })
    }

    /// Identifier used in the detail route: the UID, or the document id when
    /// there is none. The detail fetcher resolves both.
    pub fn identifier(&self) -> &str {
        self.uid.as_deref().unwrap_or(&self.id)
    }

    /// Link to the detail page
    pub fn href(&self) -> String {
        post_path(self.identifier())
    }
}

/// One page of the post list plus the cursor to the next page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPagination {
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

impl PostPagination {
    /// Convert a search response, keeping the upstream order and cursor
    pub fn from_response(response: SearchResponse) -> Result<Self> {
        let results = response
            .results
            .iter()
            .map(PostSummary::from_document)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            next_page: normalize_cursor(response.next_page),
            results,
        })
    }
}

/// Treat an empty cursor the same as a missing one
pub fn normalize_cursor(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.trim().is_empty())
}

/// A heading and its rendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    pub body_html: String,
    /// Unescaped text of the body, one block per line
    pub body_text: String,
}

/// A post as shown on its own page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: String,
    pub uid: Option<String>,
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    pub last_publication_date: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,

    /// Only the first upstream content group entry is surfaced
    pub content: ContentSection,

    /// Words in the surfaced section, for the reading-time estimate
    pub word_count: usize,
}

impl PostDetail {
    /// Build a detail record from a full document
    pub fn from_document(doc: &Document) -> Result<Self> {
        let title = doc
            .text_field("title")
            .ok_or_else(|| BlogError::missing(&doc.id, "title"))?;

        let first = doc
            .field("content")
            .and_then(|c| c.as_array())
            .and_then(|sections| sections.first())
            .ok_or_else(|| BlogError::missing(&doc.id, "content"))?;

        let heading = first
            .get("heading")
            .and_then(|h| h.as_str())
            .unwrap_or_default()
            .to_string();
        let body = first.get("body");
        let body_html = body.map(richtext::as_html).unwrap_or_default();
        let body_text = body.map(richtext::as_text).unwrap_or_default();
        let word_count = count_words(&heading) + count_words(&body_text);

        let banner_url = doc
            .field("banner")
            .and_then(|b| b.get("url"))
            .and_then(|u| u.as_str())
            .map(String::from);

        Ok(Self {
            id: doc.id.clone(),
            uid: doc.uid.clone(),
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: title.to_string(),
            banner_url,
            author: doc.text_field("author").unwrap_or_default().to_string(),
            content: ContentSection {
                heading,
                body_html,
                body_text,
            },
            word_count,
        })
    }

    /// Whether the post was republished after its first publication
    pub fn was_edited(&self) -> bool {
        match (self.first_publication_date, self.last_publication_date) {
            (Some(first), Some(last)) => last > first,
            _ => false,
        }
    }
}
