use crate::auth::models::RequesterContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use depot_core::models::DeleteFileResponse;
use std::sync::Arc;
use uuid::Uuid;

/// Delete a file: the stored object (best effort) and its metadata record.
#[utoipa::path(
    delete,
    path = "/api/v0/files/{id}",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteFileResponse),
        (status = 403, description = "Requester does not own the file", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(
        user_id = %requester.user_id,
        file_id = %id,
        operation = "delete_file"
    )
)]
pub async fn delete_file(
    requester: RequesterContext,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state.file_access.delete_file(requester.user_id, id).await?;

    Ok(Json(DeleteFileResponse {
        id: outcome.file_id,
        object_removed: outcome.object_removed,
    }))
}
