//! OpenAPI documentation.

use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use depot_core::models::{
    CreateFileRequest, DeleteFileResponse, DownloadUrlResponse, FileKind, FileResponse,
    IdentitySnapshot, UploadUrlRequest, UploadUrlResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload_url::issue_upload_url,
        crate::handlers::file_create::create_file,
        crate::handlers::download_url::issue_download_url,
        crate::handlers::file_delete::delete_file,
    ),
    components(schemas(
        UploadUrlRequest,
        UploadUrlResponse,
        CreateFileRequest,
        FileResponse,
        DownloadUrlResponse,
        DeleteFileResponse,
        FileKind,
        IdentitySnapshot,
        ErrorResponse,
    )),
    tags(
        (name = "files", description = "File metadata and presigned transfer URLs")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI spec as JSON.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
