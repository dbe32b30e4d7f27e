//! Error types shared by the loaders, the API client and the server

use thiserror::Error;

use crate::pagination::PaginationError;

/// Errors produced while fetching or rendering blog content
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },

    #[error("Document {document} is missing field {field:?}")]
    MissingField { document: String, field: String },

    #[error("Invalid publication date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid API endpoint {url:?}: {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),

    #[error("API entry point exposes no master ref")]
    NoMasterRef,

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl BlogError {
    /// Whether the error was caused by the upstream content API
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            BlogError::Http(_)
                | BlogError::Status { .. }
                | BlogError::Decode(_)
                | BlogError::MissingField { .. }
                | BlogError::InvalidDate(_)
                | BlogError::NoMasterRef
                | BlogError::InvalidEndpoint { .. }
        )
    }

    pub(crate) fn missing(document: &str, field: &str) -> Self {
        BlogError::MissingField {
            document: document.to_string(),
            field: field.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
