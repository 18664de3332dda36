use crate::auth::models::RequesterContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use depot_core::models::{CreateFileRequest, FileResponse};
use depot_core::AppError;
use std::sync::Arc;
use validator::Validate;

/// Register an uploaded file.
///
/// The storage key must come from a prior upload-url grant; the response
/// carries the author identity when the identity service answered in time
/// (`author_status` reports the enrichment outcome).
#[utoipa::path(
    post,
    path = "/api/v0/files",
    tag = "files",
    request_body = CreateFileRequest,
    responses(
        (status = 201, description = "File record created", body = FileResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        user_id = %requester.user_id,
        operation = "create_file"
    )
)]
pub async fn create_file(
    requester: RequesterContext,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateFileRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let created = state
        .file_access
        .create_file(
            requester.user_id,
            &request.file_name,
            request.kind,
            &request.storage_key,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FileResponse::from_parts(created.record, created.author)),
    ))
}
