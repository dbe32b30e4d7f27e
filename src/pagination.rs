//! Incremental "load more" pagination
//!
//! [`Accumulator`] follows the upstream cursor one page at a time and keeps
//! every post loaded after the seed page. The seed page itself is never stored
//! here, so the two lists can be rendered one after the other without
//! duplicates.
//!
//! State transitions:
//!
//! ```text
//! Idle(Some(url)) --begin--> Loading(url) --apply(page)--> Idle(page.next_page)
//!                                         --fail-------> Idle(Some(url))
//! Idle(None)      --begin--> Idle(None)     (no request)
//! Loading(_)      --begin--> error: InFlight
//! ```

use thiserror::Error;

use crate::content::{normalize_cursor, PostPagination, PostSummary};
use crate::error::Result;
use crate::prismic::PageSource;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("A page is already being loaded")]
    InFlight,

    #[error("No page is being loaded")]
    NotLoading,
}

/// Cursor state of the accumulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorState {
    /// Waiting for the user; `None` means every page has been loaded
    Idle(Option<String>),
    /// A fetch of this cursor is in flight
    Loading(String),
}

/// Posts loaded beyond the seed page, plus the cursor to the next one
#[derive(Debug, Clone)]
pub struct Accumulator {
    state: CursorState,
    posts: Vec<PostSummary>,
}

impl Accumulator {
    /// Start from the cursor returned with the seed page
    pub fn new(cursor: Option<String>) -> Self {
        Self {
            state: CursorState::Idle(normalize_cursor(cursor)),
            posts: Vec::new(),
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// The next cursor, when idle
    pub fn cursor(&self) -> Option<&str> {
        match &self.state {
            CursorState::Idle(cursor) => cursor.as_deref(),
            CursorState::Loading(_) => None,
        }
    }

    /// Posts loaded so far, in load order
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Whether the "load more" affordance should be shown
    pub fn has_more(&self) -> bool {
        matches!(&self.state, CursorState::Idle(Some(_)))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CursorState::Loading(_))
    }

    /// Enter `Loading` and return the URL to fetch.
    ///
    /// Returns `Ok(None)` without changing anything when there is no cursor.
    pub fn begin(&mut self) -> std::result::Result<Option<String>, PaginationError> {
        match &self.state {
            CursorState::Loading(_) => Err(PaginationError::InFlight),
            CursorState::Idle(None) => Ok(None),
            CursorState::Idle(Some(cursor)) => {
                let cursor = cursor.clone();
                self.state = CursorState::Loading(cursor.clone());
                Ok(Some(cursor))
            }
        }
    }

    /// Append a fetched page and move to its cursor
    pub fn apply(&mut self, page: PostPagination) -> std::result::Result<(), PaginationError> {
        if !self.is_loading() {
            return Err(PaginationError::NotLoading);
        }
        self.posts.extend(page.results);
        self.state = CursorState::Idle(normalize_cursor(page.next_page));
        Ok(())
    }

    /// Abandon the in-flight load, keeping the cursor so it can be retried
    pub fn fail(&mut self) -> std::result::Result<(), PaginationError> {
        match std::mem::replace(&mut self.state, CursorState::Idle(None)) {
            CursorState::Loading(cursor) => {
                self.state = CursorState::Idle(Some(cursor));
                Ok(())
            }
            idle => {
                self.state = idle;
                Err(PaginationError::NotLoading)
            }
        }
    }

    /// Load the next page, if any. Returns the number of posts appended.
    ///
    /// No request is issued when the cursor is exhausted.
    pub async fn load_more<S>(&mut self, source: &S) -> Result<usize>
    where
        S: PageSource + ?Sized,
    {
        let Some(cursor) = self.begin()? else {
            return Ok(0);
        };

        let page = match source.fetch_page(&cursor).await {
            Ok(response) => PostPagination::from_response(response),
            Err(e) => Err(e),
        };

        match page {
            Ok(page) => {
                let count = page.results.len();
                self.apply(page)?;
                tracing::debug!("Appended {} posts (more: {})", count, self.has_more());
                Ok(count)
            }
            Err(e) => {
                self.fail()?;
                Err(e)
            }
        }
    }

    /// Follow the cursor until it is exhausted
    pub async fn load_all<S>(&mut self, source: &S) -> Result<usize>
    where
        S: PageSource + ?Sized,
    {
        let mut total = 0;
        while self.has_more() {
            total += self.load_more(source).await?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlogError;
    use crate::prismic::SearchResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages by cursor and records every request
    struct StubSource {
        pages: HashMap<String, serde_json::Value>,
        requests: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(pages: Vec<(&str, serde_json::Value)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for StubSource {
        async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse> {
            self.requests.lock().unwrap().push(cursor.to_string());
            match self.pages.get(cursor) {
                Some(page) => Ok(serde_json::from_value(page.clone())?),
                None => Err(BlogError::Status {
                    status: 500,
                    url: cursor.to_string(),
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn post(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "uid": id,
            "type": "posts",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {"title": format!("Post {}", id), "subtitle": "", "author": "Ana"}
        })
    }

    fn ids(acc: &Accumulator) -> Vec<&str> {
        acc.posts().iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_more_appends_and_advances() {
        let source = StubSource::new(vec![
            ("U1", json!({"next_page": "U2", "results": [post("P1"), post("P2")]})),
            ("U2", json!({"next_page": null, "results": [post("P3")]})),
        ]);
        let mut acc = Accumulator::new(Some("U1".to_string()));

        assert_eq!(acc.load_more(&source).await.unwrap(), 2);
        assert_eq!(ids(&acc), vec!["P1", "P2"]);
        assert_eq!(acc.cursor(), Some("U2"));
        assert!(acc.has_more());

        assert_eq!(acc.load_more(&source).await.unwrap(), 1);
        assert_eq!(ids(&acc), vec!["P1", "P2", "P3"]);
        assert_eq!(acc.cursor(), None);
        assert!(!acc.has_more());

        assert_eq!(source.requests(), vec!["U1", "U2"]);
    }

    #[tokio::test]
    async fn test_no_cursor_issues_no_request() {
        let source = StubSource::new(vec![]);
        let mut acc = Accumulator::new(None);

        assert_eq!(acc.load_more(&source).await.unwrap(), 0);
        assert!(acc.posts().is_empty());
        assert!(source.requests().is_empty());
        assert_eq!(acc.state(), &CursorState::Idle(None));
    }

    #[tokio::test]
    async fn test_exhausted_cursor_stops_requests() {
        let source = StubSource::new(vec![(
            "U1",
            json!({"next_page": "", "results": [post("P1")]}),
        )]);
        let mut acc = Accumulator::new(Some("U1".to_string()));

        acc.load_more(&source).await.unwrap();
        acc.load_more(&source).await.unwrap();

        assert_eq!(ids(&acc), vec!["P1"]);
        assert_eq!(source.requests(), vec!["U1"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_list_and_cursor() {
        let source = StubSource::new(vec![(
            "U1",
            json!({"next_page": "U2", "results": [post("P1")]}),
        )]);
        let mut acc = Accumulator::new(Some("U1".to_string()));
        acc.load_more(&source).await.unwrap();

        assert!(acc.load_more(&source).await.is_err());
        assert_eq!(ids(&acc), vec!["P1"]);
        assert_eq!(acc.cursor(), Some("U2"));
        assert!(!acc.is_loading());
    }

    #[tokio::test]
    async fn test_load_all() {
        let source = StubSource::new(vec![
            ("U1", json!({"next_page": "U2", "results": [post("P1")]})),
            ("U2", json!({"next_page": "U3", "results": [post("P2")]})),
            ("U3", json!({"next_page": null, "results": [post("P3")]})),
        ]);
        let mut acc = Accumulator::new(Some("U1".to_string()));
        assert_eq!(acc.load_all(&source).await.unwrap(), 3);
        assert_eq!(ids(&acc), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_in_flight_guard() {
        let mut acc = Accumulator::new(Some("U1".to_string()));
        assert_eq!(acc.begin().unwrap(), Some("U1".to_string()));
        assert!(acc.is_loading());
        assert!(!acc.has_more());
        assert_eq!(acc.begin(), Err(PaginationError::InFlight));
    }

    #[test]
    fn test_apply_requires_loading() {
        let mut acc = Accumulator::new(Some("U1".to_string()));
        assert_eq!(
            acc.apply(PostPagination::default()),
            Err(PaginationError::NotLoading)
        );
        assert_eq!(acc.fail(), Err(PaginationError::NotLoading));
        assert_eq!(acc.cursor(), Some("U1"));
    }

    #[test]
    fn test_empty_seed_cursor_is_absent() {
        let acc = Accumulator::new(Some(String::new()));
        assert!(!acc.has_more());
    }
}
