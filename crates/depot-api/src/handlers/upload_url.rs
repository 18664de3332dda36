use crate::auth::models::RequesterContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use depot_core::models::{UploadUrlRequest, UploadUrlResponse};
use depot_core::AppError;
use std::sync::Arc;
use validator::Validate;

/// Issue a presigned URL for direct upload to the object store.
#[utoipa::path(
    post,
    path = "/api/v0/files/upload-url",
    tag = "files",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Presigned upload URL issued", body = UploadUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 415, description = "Content type rejected by policy", body = ErrorResponse),
        (status = 503, description = "Object store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        user_id = %requester.user_id,
        operation = "issue_upload_url"
    )
)]
pub async fn issue_upload_url(
    requester: RequesterContext,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let grant = state
        .file_access
        .issue_upload_url(requester.user_id, &request.file_name, &request.content_type)
        .await?;

    Ok(Json(UploadUrlResponse {
        upload_url: grant.capability.url,
        storage_key: grant.storage_key,
        expires_at: grant.capability.expires_at,
    }))
}
