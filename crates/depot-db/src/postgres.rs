use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depot_core::models::{FileKind, FileRecord};
use depot_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::file_store::{FileStore, NewFileRecord};

/// Postgres-backed file record store.
#[derive(Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

/// Row shape as stored; `kind` is lowercase text constrained by the schema.
#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    file_name: String,
    kind: String,
    storage_key: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<FileRow> for FileRecord {
    type Error = AppError;

    fn try_from(row: FileRow) -> Result<Self, Self::Error> {
        let kind: FileKind = row
            .kind
            .parse()
            .map_err(|e: String| AppError::Internal(format!("corrupt file record: {}", e)))?;
        Ok(FileRecord {
            id: row.id,
            file_name: row.file_name,
            kind,
            storage_key: row.storage_key,
            owner_id: row.owner_id,
            created_at: row.created_at,
        })
    }
}

impl PgFileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            INSERT INTO files (file_name, kind, storage_key, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, file_name, kind, storage_key, owner_id, created_at
            "#,
        )
        .bind(&record.file_name)
        .bind(record.kind.as_str())
        .bind(&record.storage_key)
        .bind(record.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::InvalidInput(format!(
                    "storage key already recorded: {}",
                    record.storage_key
                ))
            } else {
                tracing::error!(error = %e, owner_id = %record.owner_id, "Failed to create file record");
                AppError::Database(e)
            }
        })?;

        let record = FileRecord::try_from(row)?;
        tracing::info!(file_id = %record.id, owner_id = %record.owner_id, "Created file record");
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, file_name, kind, storage_key, owner_id, created_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, file_id = %id, "Failed to fetch file record");
            AppError::Database(e)
        })?;

        row.map(FileRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, file_id = %id, "Failed to delete file record");
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
