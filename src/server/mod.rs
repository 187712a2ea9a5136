//! JSON API server for content records

use anyhow::Result;
use axum::{
    extract::{self, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::cache::CachedLoader;
use crate::content::{ContentStore, FieldSet, Record};
use crate::error::{ContentError, ErrorKind};
use crate::Academy;

/// Server state
struct ServerState {
    store: Arc<dyn ContentStore>,
    list_fields: FieldSet,
}

/// Query string of the detail endpoint
#[derive(Debug, Deserialize)]
struct FieldsQuery {
    fields: Option<String>,
}

/// Build the API router.
///
/// Routes are nested under `api_prefix`; an empty prefix or `/` mounts them
/// at the root.
pub fn router(store: Arc<dyn ContentStore>, list_fields: FieldSet, api_prefix: &str) -> Router {
    let state = Arc::new(ServerState { store, list_fields });

    let api = Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/:slug", get(show_project))
        .with_state(state);

    let prefix = api_prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&format!("/{}", prefix), api)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the API server
pub async fn start(academy: &Academy, ip: &str, port: u16, watch: bool) -> Result<()> {
    let loader = academy.loader();

    let (store, cache): (Arc<dyn ContentStore>, Option<Arc<CachedLoader>>) =
        if academy.config.cache {
            let cached = Arc::new(CachedLoader::new(loader));
            let store: Arc<dyn ContentStore> = cached.clone();
            (store, Some(cached))
        } else {
            (Arc::new(loader), None)
        };

    let app = router(
        store,
        academy.config.list_field_set(),
        &academy.config.server.api_prefix,
    );

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!(
        "Serving {} from {:?} at http://{}:{}",
        academy.config.title,
        academy.content_dir,
        ip,
        port
    );

    // The watcher only matters when there is a cache to invalidate
    if let (true, Some(cache)) = (watch, cache) {
        let content_dir = academy.content_dir.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_invalidate(&content_dir, &cache) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Server running at http://{}:{}. Press Ctrl+C to stop.", ip, port);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the content directory and drop cache entries for changed files
fn watch_and_invalidate(content_dir: &Path, cache: &CachedLoader) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to collapse bursts of editor writes
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(content_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", content_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::info!("Content changed: {}", event.path.display());
                    cache.invalidate_path(&event.path);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// `GET /projects`
async fn list_projects(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records =
        tokio::task::spawn_blocking(move || state.store.load_all(&state.list_fields)).await??;
    Ok(Json(records))
}

/// `GET /projects/:slug?fields=a,b,c`
async fn show_project(
    State(state): State<Arc<ServerState>>,
    extract::Path(slug): extract::Path<String>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Record>, ApiError> {
    let fields = match query.fields.as_deref() {
        Some(list) => FieldSet::parse_list(list),
        None => FieldSet::detail(),
    };

    let record =
        tokio::task::spawn_blocking(move || state.store.load_by_slug(&slug, &fields)).await??;
    Ok(Json(record))
}

/// Failure of an API request, rendered as `{"error": "..."}`
#[derive(Debug)]
enum ApiError {
    Content(ContentError),
    Task(tokio::task::JoinError),
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        ApiError::Content(e)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Task(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Content(e) if e.kind() == ErrorKind::NotFound => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            ApiError::Content(e) => {
                tracing::error!("Failed to load content: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Task(e) => {
                tracing::error!("Loader task failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
