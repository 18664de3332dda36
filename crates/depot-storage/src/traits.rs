//! Object store gateway abstraction
//!
//! This module defines the ObjectGateway trait the orchestrator depends on.
//! The production implementation presigns against S3; tests substitute an
//! in-memory double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depot_core::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Object store operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for object store operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PresignFailed(msg) => AppError::Storage(msg),
            StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::UnsupportedContentType {
                content_type,
                allowed,
            } => AppError::InvalidContentType {
                content_type,
                allowed,
            },
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// HTTP method a presigned capability grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityMethod {
    Put,
    Get,
}

/// A time-bounded, single-purpose URL granting direct access to one object.
///
/// Never persisted and never reused; expiry is always strictly in the future
/// at issuance. Capabilities are stateless tokens: once issued they remain
/// valid until TTL regardless of request cancellation.
#[derive(Debug, Clone)]
pub struct PresignedCapability {
    pub url: String,
    pub method: CapabilityMethod,
    pub expires_at: DateTime<Utc>,
}

/// A PUT capability coupled with the storage key it writes to.
/// The caller must persist the key when the upload completes.
#[derive(Debug, Clone)]
pub struct UploadGrant {
    pub capability: PresignedCapability,
    pub storage_key: String,
}

/// Object store gateway
///
/// All implementations must be safe for concurrent use by many simultaneous
/// requests; operations hold no state across calls.
#[async_trait]
pub trait ObjectGateway: Send + Sync {
    /// Mint an owner-scoped storage key and issue a presigned PUT capability
    /// for exactly that key and content type.
    ///
    /// Fails with `UnsupportedContentType` when the content type is rejected
    /// by policy, or a transient error when the store cannot be reached.
    async fn issue_upload_capability(
        &self,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
    ) -> StorageResult<UploadGrant>;

    /// Issue a presigned GET capability for an existing key. The URL carries
    /// an inline content-disposition hint so the store serves the object
    /// inline rather than as an attachment.
    async fn issue_download_capability(
        &self,
        storage_key: &str,
    ) -> StorageResult<PresignedCapability>;

    /// Idempotent best-effort delete; a missing object is treated as success.
    async fn delete_object(&self, storage_key: &str) -> StorageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_maps_to_app_error() {
        let err: AppError = StorageError::PresignFailed("signing failed".to_string()).into();
        assert!(matches!(err, AppError::Storage(_)));

        let err: AppError = StorageError::UnsupportedContentType {
            content_type: "text/html".to_string(),
            allowed: vec!["image/png".to_string()],
        }
        .into();
        assert!(matches!(err, AppError::InvalidContentType { .. }));

        let err: AppError = StorageError::InvalidKey("bad key".to_string()).into();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
