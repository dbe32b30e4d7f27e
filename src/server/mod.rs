//! HTTP server: home page, post pages and the "load more" endpoint

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::cache::PageCache;
use crate::error::BlogError;
use crate::generator::Generator;
use crate::helpers::{post_path, same_origin};
use crate::prismic::public_cursor;
use crate::Blog;

/// Server state
pub struct ServerState {
    blog: Blog,
    generator: Generator,
    pages: PageCache<String>,
}

impl ServerState {
    pub fn new(blog: Blog) -> Result<Self> {
        let generator = Generator::new(&blog.config)?;
        let pages = PageCache::new(Duration::from_secs(blog.config.revalidate_secs));
        Ok(Self {
            blog,
            generator,
            pages,
        })
    }

    /// Render the error page for `err`, logging it
    fn error_page(&self, err: BlogError) -> Response {
        let status = status_for(&err);
        if status.is_server_error() {
            tracing::error!("{}", err);
        } else {
            tracing::debug!("{}", err);
        }

        match self.generator.render_error(status.as_u16(), user_message(status)) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, user_message(status)).into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/post/:uid", get(post_handler))
        .route("/api/posts", get(more_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the application router for a blog
pub fn app(blog: Blog) -> Result<Router> {
    Ok(router(Arc::new(ServerState::new(blog)?)))
}

/// Start the server
pub async fn start(blog: Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = app(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// HTTP status for an error
pub fn status_for(err: &BlogError) -> StatusCode {
    match err {
        BlogError::NotFound { .. } => StatusCode::NOT_FOUND,
        BlogError::InvalidCursor(_) => StatusCode::BAD_REQUEST,
        BlogError::Pagination(_) => StatusCode::CONFLICT,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn user_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "Página não encontrada",
        StatusCode::BAD_REQUEST => "Requisição inválida",
        StatusCode::CONFLICT => "Os posts já estão sendo carregados",
        StatusCode::BAD_GATEWAY => "Não foi possível carregar o conteúdo",
        _ => "Erro interno",
    }
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    if let Some(page) = state.pages.get("/").await {
        return Html(page).into_response();
    }

    let rendered = match state.blog.load_initial().await {
        Ok(pagination) => state.generator.render_home(&pagination),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(page) => {
            state.pages.insert("/", page.clone()).await;
            Html(page).into_response()
        }
        Err(e) => state.error_page(e),
    }
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Response {
    let key = post_path(&uid);
    if let Some(page) = state.pages.get(&key).await {
        return Html(page).into_response();
    }

    let rendered = match state.blog.fetch_detail(&uid).await {
        Ok(post) => state.generator.render_post(&post),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(page) => {
            state.pages.insert(key, page.clone()).await;
            Html(page).into_response()
        }
        Err(e) => state.error_page(e),
    }
}

#[derive(Debug, Deserialize)]
struct MoreParams {
    #[serde(default)]
    page: Option<String>,
}

/// Response of `/api/posts`
#[derive(Debug, Serialize, Deserialize)]
pub struct MoreResponse {
    pub next_page: Option<String>,
    pub html: String,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

/// Load the page after `page` and return its rendered entries with the new cursor
async fn more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<MoreParams>,
) -> Response {
    match load_more(&state, params.page).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Load more failed: {}", e);
            }
            (
                status,
                Json(ApiError {
                    error: user_message(status).to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn load_more(state: &ServerState, cursor: Option<String>) -> Result<MoreResponse, BlogError> {
    if let Some(cursor) = cursor.as_deref().filter(|c| !c.is_empty()) {
        if !same_origin(&state.blog.config.api.endpoint, cursor) {
            return Err(BlogError::InvalidCursor(format!(
                "cursor does not point at the content API: {}",
                cursor
            )));
        }
    }

    let mut accumulator = state.blog.accumulator(cursor);
    accumulator.load_more(&state.blog.client).await?;

    Ok(MoreResponse {
        next_page: accumulator.cursor().map(public_cursor),
        html: state.generator.render_cards(accumulator.posts())?,
    })
}

async fn not_found_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.generator.render_error(404, user_message(StatusCode::NOT_FOUND)) {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
