//! HTTP request handlers.
//!
//! Upload, query, export, and health endpoints over shared application
//! state. Domain failures (bad file, no data, unsupported format) come back
//! as `success:false` JSON with HTTP 200, matching what the web client
//! expects; only infrastructure problems surface as error statuses.

use crate::query::{QueryError, QueryResponder};
use crate::store::ResultStore;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use lading_domain::Record;
use lading_export::{export_records, Export, ExportError, ExportFormat, ExportPayload, JsonRecord};
use lading_extractor::Extractor;
use lading_ingest::DocumentContent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Session id header exchanged with clients.
pub const SESSION_HEADER: &str = "x-session-id";

/// Upload body cap: generous, these are shipping manifests, not archives.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session-keyed result store
    pub store: Arc<ResultStore>,
    /// Chunk/merge extraction pipeline
    pub extractor: Arc<Extractor>,
    /// Free-text query responder
    pub responder: Arc<QueryResponder>,
    /// Configured model chain, for the health endpoint
    pub models: Vec<String>,
}

/// One file's failure inside an otherwise-successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileError {
    /// Uploaded filename
    pub file: String,
    /// What went wrong
    pub message: String,
}

/// Upload response: success flag, record count, the full record array.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Whether the upload produced usable results
    pub success: bool,
    /// Number of extracted records
    pub count: usize,
    /// The extracted records themselves
    pub labeled_data: Vec<Record>,
    /// Session to pass back in the `x-session-id` header on later calls
    pub session_id: String,
    /// Per-file failures; empty when everything processed cleanly
    pub errors: Vec<FileError>,
    /// Request-level failure message (e.g. no files selected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Query request body
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Free-text question about the stored records
    pub question: String,
}

/// Query response: either an answer or an error message.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The model's answer, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Export request body
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Records to export (not necessarily the stored ResultSet)
    #[serde(default)]
    pub data: Vec<JsonRecord>,
    /// Format name: csv, excel, or json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process answers
    pub status: String,
    /// Configured model chain
    pub models: Vec<String>,
}

/// Infrastructure-level error (transport problems, not domain failures).
#[derive(Debug)]
pub enum AppError {
    /// Malformed multipart body
    Multipart(String),
    /// Anything else
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Multipart(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

/// POST /upload - process uploaded files entirely in memory.
///
/// Files are independent: one file's failure lands in `errors` while the
/// others still contribute records. The session's ResultSet is replaced
/// wholesale with this upload's records.
async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let session_id = session_from_headers(&headers);

    let mut all_records: Vec<Record> = Vec::new();
    let mut errors: Vec<FileError> = Vec::new();
    let mut file_count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(format!("Multipart error: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            // Non-file form fields are ignored.
            continue;
        };
        if filename.is_empty() {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(format!("Failed to read {}: {}", filename, e)))?;

        file_count += 1;
        info!("processing uploaded file: {} ({} bytes)", filename, bytes.len());

        match process_file(&state.extractor, &filename, &bytes).await {
            Ok(records) => all_records.extend(records),
            Err(message) => {
                warn!("{}: {}", filename, message);
                errors.push(FileError {
                    file: filename,
                    message,
                });
            }
        }
    }

    if file_count == 0 {
        return Ok(Json(UploadResponse {
            success: false,
            count: 0,
            labeled_data: Vec::new(),
            session_id,
            errors: Vec::new(),
            message: Some("No files selected".to_string()),
        }));
    }

    state.store.replace(&session_id, all_records.clone());

    // Failure only when nothing succeeded at all.
    let success = !all_records.is_empty() || errors.is_empty();

    Ok(Json(UploadResponse {
        success,
        count: all_records.len(),
        labeled_data: all_records,
        session_id,
        errors,
        message: None,
    }))
}

/// Run one file through ingest and extraction.
async fn process_file(
    extractor: &Extractor,
    filename: &str,
    bytes: &[u8],
) -> Result<Vec<Record>, String> {
    let content = lading_ingest::extract_document(bytes, filename)
        .map_err(|e| format!("Failed to extract {}: {}", filename, e))?;

    match content {
        DocumentContent::Text(text) => {
            let outcome = extractor
                .extract(&text)
                .await
                .map_err(|e| format!("Failed to process {}: {}", filename, e))?;

            if outcome.batches_failed > 0 {
                warn!(
                    "{}: {}/{} batches failed, partial results only",
                    filename, outcome.batches_failed, outcome.batches_total
                );
            }

            Ok(outcome
                .records
                .iter()
                .map(|raw| Record::from_raw(raw, filename))
                .collect())
        }
        DocumentContent::Rows(rows) => Ok(rows
            .iter()
            .map(|raw| Record::from_raw(raw, filename))
            .collect()),
    }
}

/// POST /query - free-text question about the session's records.
async fn query(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let session_id = session_from_headers(&headers);
    let records = state.store.read(&session_id);

    match state.responder.answer(&request.question, &records).await {
        Ok(answer) => Json(QueryResponse {
            answer: Some(answer),
            error: None,
        }),
        Err(e @ QueryError::NoData) => Json(QueryResponse {
            answer: None,
            error: Some(e.to_string()),
        }),
        Err(e) => Json(QueryResponse {
            answer: None,
            error: Some(format!("Error processing question: {}", e)),
        }),
    }
}

/// POST /export - serialize a record array in the requested format.
///
/// csv/json come back inside a JSON envelope for client-side download;
/// excel streams the workbook bytes directly.
async fn export(Json(request): Json<ExportRequest>) -> Response {
    let format = match request.format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return export_failure(&e),
    };

    match export_records(&request.data, format) {
        Ok(Export {
            filename,
            payload: ExportPayload::Text(text),
        }) => {
            // The json format echoes the records as structured data rather
            // than a string payload.
            let data = match format {
                ExportFormat::Json => serde_json::Value::Array(
                    request.data.into_iter().map(serde_json::Value::Object).collect(),
                ),
                _ => serde_json::Value::String(text),
            };
            Json(serde_json::json!({
                "success": true,
                "data": data,
                "filename": filename,
            }))
            .into_response()
        }
        Ok(Export {
            filename,
            payload: ExportPayload::Binary(bytes),
        }) => (
            [
                (header::CONTENT_TYPE, format.mime_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => export_failure(&e),
    }
}

fn export_failure(error: &ExportError) -> Response {
    Json(serde_json::json!({
        "success": false,
        "message": error.to_string(),
    }))
    .into_response()
}

/// GET /health - liveness plus the configured model chain.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        models: state.models.clone(),
    })
}

fn session_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/upload", post(upload))
        .route("/query", post(query))
        .route("/export", post(export))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
