//! Shared fixtures for integration tests: a mocked content API

#![allow(dead_code)]

use prismic_blog::config::{ApiConfig, SiteConfig};
use prismic_blog::Blog;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MASTER_REF: &str = "YKuiyhEAACIAgrn5";

/// API entry point served by the mock server
pub fn endpoint(server: &MockServer) -> String {
    format!("{}/api/v2", server.uri())
}

/// Search URL on the mock server for a given page number
pub fn page_url(server: &MockServer, page: u32) -> String {
    format!(
        "{}/documents/search?ref={}&page={}&pageSize=1",
        endpoint(server),
        MASTER_REF,
        page
    )
}

/// Blog configured against the mock server, UTC dates, no page cache
pub fn blog(server: &MockServer) -> Blog {
    let config = SiteConfig {
        timezone: "UTC".to_string(),
        revalidate_secs: 0,
        api: ApiConfig {
            endpoint: endpoint(server),
            access_token: Some("test-token".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    Blog::from_config(config).unwrap()
}

/// Serve the API entry point with a master ref
pub async fn mount_master_ref(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "refs": [{"id": "master", "ref": MASTER_REF, "label": "Master", "isMasterRef": true}]
        })))
        .mount(server)
        .await;
}

/// A list-result document
pub fn summary_doc(uid: &str, title: &str, date: &str) -> Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "slugs": [uid],
        "first_publication_date": date,
        "last_publication_date": date,
        "data": {"title": title, "subtitle": format!("{} subtitle", title), "author": "Joseph Oliveira"}
    })
}

/// A search response page
pub fn search_page(next_page: Option<String>, results: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "results_per_page": results.len(),
        "results_size": results.len(),
        "total_results_size": results.len(),
        "total_pages": 1,
        "next_page": next_page,
        "prev_page": null,
        "results": results
    })
}

/// A full post with two content sections
pub fn detail_doc(uid: &str) -> Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "slugs": [uid],
        "first_publication_date": "2021-03-15T19:25:28+0000",
        "last_publication_date": "2021-03-15T19:25:28+0000",
        "data": {
            "title": "Como utilizar Hooks",
            "author": "Joseph Oliveira",
            "banner": {"url": "https://images.prismic.io/blog/banner.png"},
            "content": [
                {
                    "heading": "Proin et varius",
                    "body": [
                        {"type": "paragraph", "text": "Primeiro bloco de conteúdo", "spans": [{"start": 0, "end": 8, "type": "strong"}]}
                    ]
                },
                {
                    "heading": "Cras laoreet mi",
                    "body": [
                        {"type": "paragraph", "text": "Segundo bloco escondido", "spans": []}
                    ]
                }
            ]
        }
    })
}
