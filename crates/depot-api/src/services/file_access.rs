//! File access orchestration
//!
//! The core service composing the record store, the object gateway, and the
//! identity client. Each operation is independent; there is no cross-operation
//! session state, and every collaborator is an injected capability that a
//! test double can stand in for.

use std::sync::Arc;

use depot_core::models::{AuthorEnrichment, FileKind, FileRecord};
use depot_core::AppError;
use depot_db::{FileStore, NewFileRecord};
use depot_identity::{IdentityError, IdentityLookup};
use depot_storage::{keys, ObjectGateway, PresignedCapability, UploadGrant};
use uuid::Uuid;

/// Result of a create operation: the persisted record plus the best-effort
/// author enrichment outcome. Enrichment failure is partial success, not an
/// error - the record is durable either way.
#[derive(Debug, Clone)]
pub struct CreatedFile {
    pub record: FileRecord,
    pub author: AuthorEnrichment,
}

/// Result of a delete operation. `object_removed` is false when the
/// object-store delete failed; the metadata deletion is the operation of
/// record, so this downgrades to a warning rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct DeleteOutcome {
    pub file_id: Uuid,
    pub object_removed: bool,
}

/// Orchestrates file record persistence, capability issuance, and author
/// enrichment. Cheap to clone; all collaborators are shared handles safe for
/// concurrent use.
#[derive(Clone)]
pub struct FileAccessService {
    files: Arc<dyn FileStore>,
    objects: Arc<dyn ObjectGateway>,
    identity: Arc<dyn IdentityLookup>,
}

impl FileAccessService {
    pub fn new(
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectGateway>,
        identity: Arc<dyn IdentityLookup>,
    ) -> Self {
        Self {
            files,
            objects,
            identity,
        }
    }

    /// Register a file that the client has uploaded with a prior capability.
    ///
    /// The storage key is recorded as supplied; object existence is not
    /// verified here. The key must sit inside the caller's own namespace so
    /// one user cannot register (and later delete) another user's objects.
    #[tracing::instrument(skip(self), fields(operation = "create_file", owner_id = %owner_id))]
    pub async fn create_file(
        &self,
        owner_id: Uuid,
        file_name: &str,
        kind: FileKind,
        storage_key: &str,
    ) -> Result<CreatedFile, AppError> {
        if !keys::is_owned_by(storage_key, owner_id) {
            return Err(AppError::InvalidInput(
                "storage key is not scoped to the requesting owner".to_string(),
            ));
        }

        let record = self
            .files
            .create(NewFileRecord {
                file_name: file_name.to_string(),
                kind,
                storage_key: storage_key.to_string(),
                owner_id,
            })
            .await?;

        // Best-effort enrichment: the record stays either way.
        let author = match self.identity.lookup(owner_id).await {
            Ok(snapshot) => AuthorEnrichment::Resolved(snapshot),
            Err(IdentityError::NotFound(user_id)) => {
                tracing::warn!(
                    file_id = %record.id,
                    user_id = %user_id,
                    "File created but its author does not exist in the identity service"
                );
                AuthorEnrichment::NotFound
            }
            Err(IdentityError::Unavailable(msg)) => {
                tracing::warn!(
                    file_id = %record.id,
                    error = %msg,
                    "File created without author identity"
                );
                AuthorEnrichment::Unavailable
            }
        };

        tracing::info!(
            file_id = %record.id,
            author_status = author.as_str(),
            "File registered"
        );

        Ok(CreatedFile { record, author })
    }

    /// Issue a presigned PUT capability for a freshly minted owner-scoped
    /// storage key. No record is created; the caller registers the file via
    /// [create_file](Self::create_file) once the upload completes.
    #[tracing::instrument(skip(self), fields(operation = "issue_upload_url", owner_id = %owner_id))]
    pub async fn issue_upload_url(
        &self,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadGrant, AppError> {
        let grant = self
            .objects
            .issue_upload_capability(owner_id, file_name, content_type)
            .await?;

        tracing::info!(
            owner_id = %owner_id,
            storage_key = %grant.storage_key,
            expires_at = %grant.capability.expires_at,
            "Issued upload capability"
        );

        Ok(grant)
    }

    /// Issue a presigned GET capability for an existing file. The requester
    /// must own the record.
    #[tracing::instrument(skip(self), fields(operation = "issue_download_url", file_id = %file_id))]
    pub async fn issue_download_url(
        &self,
        requester_id: Uuid,
        file_id: Uuid,
    ) -> Result<PresignedCapability, AppError> {
        let record = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", file_id)))?;

        if record.owner_id != requester_id {
            return Err(AppError::NotOwner(
                "Only the file owner may request a download URL".to_string(),
            ));
        }

        let capability = self
            .objects
            .issue_download_capability(&record.storage_key)
            .await?;

        tracing::info!(
            file_id = %file_id,
            expires_at = %capability.expires_at,
            "Issued download capability"
        );

        Ok(capability)
    }

    /// Delete a file: the stored object best-effort, then the record.
    ///
    /// Object-store failure downgrades to a warning (`object_removed: false`)
    /// because the stores are not transactionally coupled and retrying the
    /// cheap idempotent metadata delete is always possible, while a record
    /// without an object is worse than an object without a record.
    #[tracing::instrument(skip(self), fields(operation = "delete_file", file_id = %file_id))]
    pub async fn delete_file(
        &self,
        requester_id: Uuid,
        file_id: Uuid,
    ) -> Result<DeleteOutcome, AppError> {
        let record = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", file_id)))?;

        if record.owner_id != requester_id {
            return Err(AppError::NotOwner(
                "Only the file owner may delete a file".to_string(),
            ));
        }

        let object_removed = match self.objects.delete_object(&record.storage_key).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    file_id = %file_id,
                    storage_key = %record.storage_key,
                    error = %e,
                    "Object store delete failed; record deletion proceeds"
                );
                false
            }
        };

        let deleted = self.files.delete(file_id).await?;
        if !deleted {
            // Row vanished between lookup and delete.
            return Err(AppError::NotFound(format!("File not found: {}", file_id)));
        }

        tracing::info!(
            file_id = %file_id,
            object_removed = object_removed,
            "File deleted"
        );

        Ok(DeleteOutcome {
            file_id,
            object_removed,
        })
    }
}
