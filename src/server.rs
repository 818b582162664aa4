use crate::{
    confine::confine,
    errors::{into_response, AppError},
};
use axum::{
    body::Body,
    extract::{Path as UrlPath, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::{services::ServeFile, trace::TraceLayer};

/// Fixed loopback bind; the served root is the only thing decided at startup.
pub const BIND_ADDR: &str = "127.0.0.1:9000";

#[derive(Clone)]
pub struct AppState {
    pub root: Arc<PathBuf>,
}

pub async fn serve(root: PathBuf) -> anyhow::Result<()> {
    let app = build_router(AppState {
        root: Arc::new(root),
    });
    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/list", get(list))
        .route("/file/*path", get(fetch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

/// `GET /api/list?path=<relative>` — JSON array of the directory's immediate
/// children, in filesystem enumeration order (no sort is imposed).
async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let full = match confine(&state.root, &q.path) {
        Ok(p) => p,
        Err(e) => {
            audit(&request_id, "list", "deny", e.code());
            return into_response(e);
        }
    };
    match read_entries(&full).await {
        Ok(entries) => {
            audit(&request_id, "list", "allow", "OK");
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(e) => {
            let err = AppError::NotFound(e.to_string());
            audit(&request_id, "list", "error", err.code());
            into_response(err)
        }
    }
}

async fn read_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut rd = tokio::fs::read_dir(dir).await?;
    let mut out = Vec::new();
    while let Some(entry) = rd.next_entry().await? {
        let file_type = entry.file_type().await?;
        let size = if file_type.is_dir() {
            0
        } else {
            entry.metadata().await.map(|m| m.len()).unwrap_or(0)
        };
        out.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            size,
        });
    }
    Ok(out)
}

/// `GET /file/<relative>` — streams the file with an inferred content type.
///
/// The wildcard remainder is confined before the delivery primitive ever
/// sees it; `ServeFile` only receives an absolute path already proven to
/// sit under the root, so its own traversal handling is never relied on.
async fn fetch(State(state): State<AppState>, UrlPath(rel): UrlPath<String>) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let full = match confine(&state.root, &rel) {
        Ok(p) => p,
        Err(e) => {
            audit(&request_id, "fetch", "deny", e.code());
            return into_response(e);
        }
    };
    let served = ServeFile::new(&full)
        .oneshot(Request::new(Body::empty()))
        .await;
    match served {
        Ok(res) => {
            let decision = if res.status() == StatusCode::NOT_FOUND {
                "error"
            } else {
                "allow"
            };
            audit(&request_id, "fetch", decision, res.status().as_str());
            res.map(Body::new).into_response()
        }
        Err(never) => match never {},
    }
}

fn audit(request_id: &str, op: &str, decision: &str, code: &str) {
    tracing::info!(
        request_id = request_id,
        op = op,
        decision = decision,
        code = code,
        "audit"
    );
}
