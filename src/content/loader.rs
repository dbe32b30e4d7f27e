//! Content loaders: the first page of the post list and single post details

use crate::config::ApiConfig;
use crate::error::{BlogError, Result};
use crate::prismic::{Predicate, PrismicClient, SearchQuery};

use super::{PostDetail, PostPagination};

/// Fields requested for list entries
const SUMMARY_FIELDS: [&str; 3] = ["title", "subtitle", "author"];

/// Query for the first page of the post list
pub fn initial_query(api: &ApiConfig) -> SearchQuery {
    SearchQuery::new(vec![Predicate::document_type(&api.document_type)])
        .fetch(
            SUMMARY_FIELDS
                .iter()
                .map(|field| format!("{}.{}", api.document_type, field)),
        )
        .page_size(api.page_size)
}

/// Fetch page 1 of the post list and the cursor to page 2
pub async fn load_initial(client: &PrismicClient, api: &ApiConfig) -> Result<PostPagination> {
    let response = client.query(&initial_query(api)).await?;
    let pagination = PostPagination::from_response(response)?;

    tracing::info!(
        "Loaded {} posts (more: {})",
        pagination.results.len(),
        pagination.next_page.is_some()
    );
    Ok(pagination)
}

/// Fetch one post by its routed identifier: the UID, or the document id for
/// posts that have no UID
pub async fn fetch_detail(client: &PrismicClient, api: &ApiConfig, uid: &str) -> Result<PostDetail> {
    let document = match client.get_by_uid(&api.document_type, uid).await {
        Err(BlogError::NotFound { .. }) => {
            tracing::debug!("No post with UID {:?}, trying it as a document id", uid);
            client.get_by_id(&api.document_type, uid).await?
        }
        other => other?,
    };
    let detail = PostDetail::from_document(&document)?;

    tracing::info!("Loaded post {:?}", uid);
    Ok(detail)
}
