use async_trait::async_trait;
use depot_core::models::{FileKind, FileRecord};
use depot_core::AppError;
use uuid::Uuid;

/// Fields for a new file record. The id and creation timestamp are generated
/// by the store on insert.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub file_name: String,
    pub kind: FileKind,
    pub storage_key: String,
    pub owner_id: Uuid,
}

/// Record-store capability consumed by the orchestrator.
///
/// Implementations must be safe for concurrent use; the file id is the
/// concurrency boundary and single-row atomicity is the store's job.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist a new record and return it with its generated id.
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError>;

    /// Fetch a record by id, or None when absent.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError>;

    /// Delete a record by id. Returns false when no row existed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
