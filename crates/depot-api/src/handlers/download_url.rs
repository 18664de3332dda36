use crate::auth::models::RequesterContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use depot_core::models::DownloadUrlResponse;
use std::sync::Arc;
use uuid::Uuid;

/// Issue a presigned URL for direct download from the object store.
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}/download-url",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Presigned download URL issued", body = DownloadUrlResponse),
        (status = 403, description = "Requester does not own the file", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 503, description = "Object store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(
        user_id = %requester.user_id,
        file_id = %id,
        operation = "issue_download_url"
    )
)]
pub async fn issue_download_url(
    requester: RequesterContext,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let capability = state
        .file_access
        .issue_download_url(requester.user_id, id)
        .await?;

    Ok(Json(DownloadUrlResponse {
        download_url: capability.url,
        expires_at: capability.expires_at,
    }))
}
