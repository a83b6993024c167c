//! `POST /upload-pdf`

use agents::AgentResult;
use axum::Json;
use axum::extract::{Multipart, State};
use orchestrator::OperationError;
use shared::{Component, ExtractionReport, OperationKind, component_info, component_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::session::Session;
use crate::state::AppState;
use crate::types::UploadResponse;
use crate::upload;
use crate::web::SessionId;

const FILE_FIELD: &str = "file";

/// Validate, extract and store an uploaded PDF under the caller's session
pub async fn upload_pdf(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    mut multipart: Multipart,
) -> WebServerResult<Json<UploadResponse>> {
    let mut field = loop {
        match multipart
            .next_field()
            .await
            .map_err(|e| WebServerError::BadRequest(format!("Invalid multipart body: {e}")))?
        {
            Some(field) if field.name() == Some(FILE_FIELD) => break field,
            Some(_) => continue,
            None => return Err(WebServerError::BadRequest("No file provided".to_string())),
        }
    };

    let filename = upload::require_filename(field.file_name())?;
    upload::check_extension(&filename)?;
    let bytes = upload::read_bounded(&mut field, state.config.max_upload_bytes).await?;
    let size_bytes = bytes.len();

    component_info!(
        Component::Api,
        session_id = %session_id,
        filename = %filename,
        size_bytes,
        "📄 Processing upload"
    );

    let extractor = state.collaborators.extractor.clone();
    let report = state
        .orchestrator
        .execute_blocking(OperationKind::Upload, move |cancel| -> AgentResult<ExtractionReport> {
            let spooled = upload::spool(&bytes)?;
            extractor.extract(spooled.path(), &cancel)
        })
        .await
        .map_err(upload_failure)?
        .into_inner();

    upload::check_report(&report, state.config.min_word_count).inspect_err(|e| {
        component_warn!(Component::Api, session_id = %session_id, filename = %filename, "Upload rejected: {}", e);
    })?;

    let response = accepted(&session_id, &report);
    state
        .sessions
        .put(&session_id, Session::from_upload(&filename, size_bytes, report))
        .await;

    component_info!(
        Component::Api,
        session_id = %session_id,
        word_count = response.word_count,
        page_count = response.page_count,
        "✅ Stored session"
    );

    Ok(Json(response))
}

fn accepted(session_id: &str, report: &ExtractionReport) -> UploadResponse {
    UploadResponse {
        status: report.status,
        message: report.message.clone(),
        word_count: report.word_count,
        page_count: report.page_count,
        methods_used: report.methods_used.clone(),
        session_id: session_id.to_string(),
    }
}

fn upload_failure(err: OperationError) -> WebServerError {
    match err {
        OperationError::TimedOut { .. } => {
            WebServerError::Timeout("PDF processing timeout. File may be too complex or large.".to_string())
        }
        other => WebServerError::from_operation(other, "Processing"),
    }
}
