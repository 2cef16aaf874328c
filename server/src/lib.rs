use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use booldex_core::extract::extract_pdf_text;
use booldex_core::{BuildOutcome, DocId, QueryHit, Session};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const UI_PAGE: &str = include_str!("ui.html");

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub max_upload_bytes: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self { max_upload_bytes: 50 * 1024 * 1024 }
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// Which connective rule was applied, `None` when the query was skipped.
    pub form: Option<String>,
    pub index_built: bool,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<QueryHit>,
}

#[derive(Serialize)]
pub struct DocSummary {
    pub doc_id: DocId,
    pub source: String,
    pub chars: usize,
}

#[derive(Serialize)]
pub struct BuildResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub documents: usize,
    pub terms: usize,
}

pub fn build_app(options: AppOptions) -> Router {
    build_app_with_state(AppState::default(), options)
}

pub fn build_app_with_state(state: AppState, options: AppOptions) -> Router {
    Router::new()
        .route("/", get(|| async { Html(UI_PAGE) }))
        .route("/health", get(|| async { "ok" }))
        .route("/documents", get(list_documents).post(upload_documents).delete(clear_documents))
        .route("/index", post(build_index))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref()))
}

/// Origins listed in `allowed` (comma-separated); any origin when unset or nothing parses.
fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .into_iter()
        .flat_map(|list| list.split(','))
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    let origin = if origins.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(origins) };
    CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any)
}

/// Extract every uploaded PDF, then store them all. One bad file rejects the whole upload.
pub async fn upload_documents(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<Vec<DocSummary>>, (StatusCode, String)> {
    let mut extracted: Vec<(String, String)> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))? {
        let name = field.name().unwrap_or_default().to_string();
        if name != "files" && name != "file" { continue; }
        let source = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field.bytes().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let text = extract_pdf_text(&bytes).map_err(|e| {
            tracing::warn!(%source, error = %e, "pdf extraction failed");
            (StatusCode::UNPROCESSABLE_ENTITY, format!("{source}: {e}"))
        })?;
        extracted.push((source, text));
    }

    let mut session = state.session.write();
    let stored: Vec<DocSummary> = extracted
        .into_iter()
        .map(|(source, text)| {
            let chars = text.chars().count();
            let doc_id = session.add_document(source.clone(), text);
            DocSummary { doc_id, source, chars }
        })
        .collect();
    tracing::info!(uploaded = stored.len(), total = session.documents().len(), "documents stored");
    Ok(Json(stored))
}

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocSummary>> {
    let session = state.session.read();
    let docs = session
        .documents()
        .iter()
        .map(|d| DocSummary { doc_id: d.id, source: d.source.clone(), chars: d.text.chars().count() })
        .collect();
    Json(docs)
}

pub async fn clear_documents(State(state): State<AppState>) -> StatusCode {
    state.session.write().clear();
    tracing::info!("session cleared");
    StatusCode::NO_CONTENT
}

pub async fn build_index(State(state): State<AppState>) -> Json<BuildResponse> {
    let outcome = state.session.write().build_index();
    let resp = match outcome {
        BuildOutcome::Built { documents, terms } => BuildResponse {
            status: "success",
            message: "Inverted index built successfully!",
            documents,
            terms,
        },
        BuildOutcome::NoDocuments => BuildResponse {
            status: "warning",
            message: "No documents uploaded!",
            documents: 0,
            terms: 0,
        },
    };
    Json(resp)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let session = state.session.read();
    let (form, index_built, results) = match session.query(&params.q) {
        Some((query, hits)) => (Some(query.to_string()), true, hits),
        None => (None, false, Vec::new()),
    };
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), index_built, "search");
    Json(SearchResponse {
        query: params.q,
        form,
        index_built,
        took_s: elapsed.as_secs_f64(),
        total_hits: results.len(),
        results,
    })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let not_found = || (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })));
    let doc_id: DocId = doc_id.parse().map_err(|_| not_found())?;
    let session = state.session.read();
    let doc = session.documents().get(doc_id).ok_or_else(not_found)?;
    Ok(Json(serde_json::json!({
        "doc_id": doc.id,
        "source": doc.source,
        "text": doc.text,
    })))
}
