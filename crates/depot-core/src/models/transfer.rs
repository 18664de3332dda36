use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::file::{FileKind, FileRecord};
use super::identity::{AuthorEnrichment, IdentitySnapshot};

/// Request body for presigned upload URL issuance.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadUrlRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 255))]
    pub content_type: String,
}

/// Presigned PUT capability plus the storage key it writes to.
///
/// The caller uploads directly to `upload_url`, then registers the file with
/// `POST /files` using the returned storage key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub storage_key: String,
    pub expires_at: DateTime<Utc>,
}

/// Request body for registering an uploaded file.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFileRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    pub kind: FileKind,
    #[validate(length(min = 1, max = 1024))]
    pub storage_key: String,
}

/// File record response, with best-effort author identity attached.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub file_name: String,
    pub kind: FileKind,
    pub storage_key: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<IdentitySnapshot>,
    /// Enrichment outcome: "resolved", "unavailable", or "not_found".
    pub author_status: String,
}

impl FileResponse {
    pub fn from_parts(record: FileRecord, author: AuthorEnrichment) -> Self {
        let author_status = author.as_str().to_string();
        let author = match author {
            AuthorEnrichment::Resolved(snapshot) => Some(snapshot),
            _ => None,
        };
        FileResponse {
            id: record.id,
            file_name: record.file_name,
            kind: record.kind,
            storage_key: record.storage_key,
            owner_id: record.owner_id,
            created_at: record.created_at,
            author,
            author_status,
        }
    }
}

/// Presigned GET capability for an existing file.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadUrlResponse {
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Deletion outcome. `object_removed` is false when the object-store delete
/// failed and only the metadata record was removed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponse {
    pub id: Uuid,
    pub object_removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record(owner_id: Uuid) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4(),
            file_name: "photo.png".to_string(),
            kind: FileKind::Image,
            storage_key: format!("{}/abc_photo.png", owner_id),
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_file_response_with_resolved_author() {
        let owner_id = Uuid::new_v4();
        let record = test_record(owner_id);
        let snapshot = IdentitySnapshot {
            id: owner_id,
            username: "ada".to_string(),
            display_name: "Ada Lovelace".to_string(),
            avatar_url: Some("https://cdn.example.com/ada.png".to_string()),
        };

        let response =
            FileResponse::from_parts(record.clone(), AuthorEnrichment::Resolved(snapshot.clone()));

        assert_eq!(response.id, record.id);
        assert_eq!(response.storage_key, record.storage_key);
        assert_eq!(response.author, Some(snapshot));
        assert_eq!(response.author_status, "resolved");
    }

    #[test]
    fn test_file_response_without_author() {
        let record = test_record(Uuid::new_v4());
        let response = FileResponse::from_parts(record, AuthorEnrichment::Unavailable);
        assert!(response.author.is_none());
        assert_eq!(response.author_status, "unavailable");
    }

    #[test]
    fn test_upload_url_request_validation() {
        let ok = UploadUrlRequest {
            file_name: "photo.png".to_string(),
            content_type: "image/png".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = UploadUrlRequest {
            file_name: String::new(),
            content_type: "image/png".to_string(),
        };
        assert!(empty.validate().is_err());
    }
}
