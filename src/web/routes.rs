//! HTTP routes: upload form, direct analysis, stored-document analysis.
//!
//! The two analysis routes differ only in how document text is acquired;
//! both feed the same [`run_analysis`] path.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::{IngestError, PipelineError};
use crate::ingest::{DocumentSource, ObjectStoreClient, UploadedDocument};
use crate::report::processor::ReportProcessor;
use crate::web::render;

/// Multipart field carrying the uploaded report.
const DOCUMENT_FIELD: &str = "document";

/// Shared state for the report routes.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<ReportProcessor>,
    /// Absent when no object store is configured.
    pub store: Option<Arc<ObjectStoreClient>>,
}

/// Build the application router.
pub fn report_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(upload_form))
        .route("/analyze", post(analyze_upload))
        .route("/analyze/stored", post(analyze_stored))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /, submission forms.
async fn upload_form() -> Html<String> {
    Html(render::upload_page(""))
}

/// POST /analyze, multipart upload of a report document.
async fn analyze_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(DOCUMENT_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => break UploadedDocument::new(filename, bytes.to_vec()),
                    Err(e) => {
                        warn!(error = %e, "Failed to read uploaded field");
                        return reject(
                            StatusCode::BAD_REQUEST,
                            "Failed to read the uploaded file",
                        );
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                return reject(StatusCode::BAD_REQUEST, "No report file in the request");
            }
            Err(e) => {
                warn!(error = %e, "Malformed multipart request");
                return reject(StatusCode::BAD_REQUEST, "Malformed upload request");
            }
        }
    };

    run_analysis(&state, &upload).await
}

#[derive(Debug, Deserialize)]
struct StoredDocumentForm {
    key: String,
}

/// POST /analyze/stored, analyze a document already in the object store.
async fn analyze_stored(
    State(state): State<AppState>,
    Form(form): Form<StoredDocumentForm>,
) -> Response {
    let Some(store) = &state.store else {
        return reject(
            StatusCode::NOT_FOUND,
            "No object store is configured on this server",
        );
    };
    if form.key.trim().is_empty() {
        return reject(StatusCode::BAD_REQUEST, "No document name given");
    }

    let source = store.document(form.key.trim());
    run_analysis(&state, &source).await
}

/// Shared analysis path: acquire text, run the pipeline, render the result.
async fn run_analysis(state: &AppState, source: &dyn DocumentSource) -> Response {
    let text = match source.fetch_text().await {
        Ok(text) => text,
        Err(e) => return ingest_failure(source.name(), e),
    };

    match state.processor.process(&text).await {
        Ok(processed) => {
            let block = render::summary_block(&processed.report, &processed.insight);
            Html(render::upload_page(&block)).into_response()
        }
        Err(e) => pipeline_failure(e),
    }
}

fn ingest_failure(source: &str, err: IngestError) -> Response {
    let status = match &err {
        IngestError::EmptyDocument | IngestError::InvalidEncoding => StatusCode::BAD_REQUEST,
        IngestError::NotFound { .. } => StatusCode::NOT_FOUND,
        IngestError::Fetch { .. } => StatusCode::BAD_GATEWAY,
    };
    warn!(source, error = %err, "Document ingest failed");
    reject(status, &err.to_string())
}

fn pipeline_failure(err: PipelineError) -> Response {
    match err {
        PipelineError::Incomplete { missing, record } => {
            let record_json = serde_json::to_string_pretty(&record).unwrap_or_default();
            (
                StatusCode::BAD_REQUEST,
                Html(render::upload_page(&render::incomplete_block(
                    &missing,
                    &record_json,
                ))),
            )
                .into_response()
        }
        PipelineError::DocumentTooLarge { .. } => {
            reject(StatusCode::BAD_REQUEST, &err.to_string())
        }
        PipelineError::Queue(e) => {
            error!(error = %e, "Alert queue publish failed");
            reject(
                StatusCode::BAD_GATEWAY,
                "Failed to forward the report to the alert queue",
            )
        }
        PipelineError::Report(e) => {
            // Completeness is checked before classification; reaching this
            // means a bug, not bad input.
            error!(error = %e, "Classification failed on a complete record");
            reject(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (
        status,
        Html(render::upload_page(&render::error_block(message))),
    )
        .into_response()
}
