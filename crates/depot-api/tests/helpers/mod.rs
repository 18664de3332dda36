//! Test helpers: in-memory doubles for the record store, object gateway, and
//! identity client, plus state/router construction for HTTP-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use depot_api::services::FileAccessService;
use depot_api::state::AppState;
use depot_core::models::{FileRecord, IdentitySnapshot};
use depot_core::{AppError, Config};
use depot_db::{FileStore, NewFileRecord};
use depot_identity::{IdentityError, IdentityLookup};
use depot_storage::{
    keys, s3::content_type_allowed, CapabilityMethod, ObjectGateway, PresignedCapability,
    StorageError, StorageResult, UploadGrant,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_MASTER_API_KEY: &str = "test-master-key-0123456789";

/// In-memory record store.
#[derive(Default)]
pub struct MemoryFileStore {
    records: Mutex<HashMap<Uuid, FileRecord>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.records.lock().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        let record = FileRecord {
            id: Uuid::new_v4(),
            file_name: record.file_name,
            kind: record.kind,
            storage_key: record.storage_key,
            owner_id: record.owner_id,
            created_at: Utc::now(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }
}

/// In-memory object gateway. Objects are seeded explicitly because presigning
/// alone never creates anything in a real store either.
pub struct MemoryObjectGateway {
    objects: Mutex<HashSet<String>>,
    fail_delete: AtomicBool,
    allowed_content_types: Vec<String>,
    ttl: Duration,
}

impl MemoryObjectGateway {
    pub fn new(allowed_content_types: Vec<String>) -> Self {
        Self {
            objects: Mutex::new(HashSet::new()),
            fail_delete: AtomicBool::new(false),
            allowed_content_types,
            ttl: Duration::minutes(15),
        }
    }

    pub fn seed_object(&self, storage_key: &str) {
        self.objects.lock().unwrap().insert(storage_key.to_string());
    }

    pub fn has_object(&self, storage_key: &str) -> bool {
        self.objects.lock().unwrap().contains(storage_key)
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectGateway for MemoryObjectGateway {
    async fn issue_upload_capability(
        &self,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
    ) -> StorageResult<UploadGrant> {
        if !content_type_allowed(content_type, &self.allowed_content_types) {
            return Err(StorageError::UnsupportedContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        let storage_key = keys::mint_storage_key(owner_id, file_name);
        Ok(UploadGrant {
            capability: PresignedCapability {
                url: format!("https://store.test/{}?sig=put", storage_key),
                method: CapabilityMethod::Put,
                expires_at: Utc::now() + self.ttl,
            },
            storage_key,
        })
    }

    async fn issue_download_capability(
        &self,
        storage_key: &str,
    ) -> StorageResult<PresignedCapability> {
        Ok(PresignedCapability {
            url: format!("https://store.test/{}?sig=get&disposition=inline", storage_key),
            method: CapabilityMethod::Get,
            expires_at: Utc::now() + self.ttl,
        })
    }

    async fn delete_object(&self, storage_key: &str) -> StorageResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("injected failure".to_string()));
        }
        // Missing object is success, matching S3 DeleteObject semantics
        self.objects.lock().unwrap().remove(storage_key);
        Ok(())
    }
}

/// Scripted identity lookup double.
pub enum IdentityScript {
    AlwaysResolve,
    AlwaysUnavailable,
    AlwaysNotFound,
}

pub struct StubIdentity {
    script: IdentityScript,
    pub calls: AtomicU32,
}

impl StubIdentity {
    pub fn new(script: IdentityScript) -> Self {
        Self {
            script,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl IdentityLookup for StubIdentity {
    async fn lookup(&self, user_id: Uuid) -> Result<IdentitySnapshot, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            IdentityScript::AlwaysResolve => Ok(IdentitySnapshot {
                id: user_id,
                username: "ada".to_string(),
                display_name: "Ada Lovelace".to_string(),
                avatar_url: None,
            }),
            IdentityScript::AlwaysUnavailable => {
                Err(IdentityError::Unavailable("connection refused".to_string()))
            }
            IdentityScript::AlwaysNotFound => Err(IdentityError::NotFound(user_id)),
        }
    }
}

pub fn allowed_content_types() -> Vec<String> {
    vec![
        "image/png".to_string(),
        "image/jpeg".to_string(),
        "application/pdf".to_string(),
    ]
}

/// Build a FileAccessService over in-memory doubles, returning the doubles
/// for assertions.
pub fn build_service(
    script: IdentityScript,
) -> (
    FileAccessService,
    Arc<MemoryFileStore>,
    Arc<MemoryObjectGateway>,
) {
    let files = Arc::new(MemoryFileStore::new());
    let objects = Arc::new(MemoryObjectGateway::new(allowed_content_types()));
    let identity = Arc::new(StubIdentity::new(script));

    let service = FileAccessService::new(files.clone(), objects.clone(), identity);
    (service, files, objects)
}

pub fn test_config() -> Config {
    Config {
        server_port: 3000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgresql://localhost/depot_test".to_string(),
        db_max_connections: 5,
        db_timeout_seconds: 30,
        master_api_key: TEST_MASTER_API_KEY.to_string(),
        s3_bucket: "depot-test".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        presign_ttl_seconds: 900,
        allowed_content_types: allowed_content_types(),
        identity_base_url: "http://identity.test".to_string(),
        identity_timeout_seconds: 3,
        identity_max_attempts: 3,
        identity_retry_delay_ms: 0,
    }
}

/// Build application state over in-memory doubles for HTTP-level tests.
pub fn test_state(
    script: IdentityScript,
) -> (
    Arc<AppState>,
    Arc<MemoryFileStore>,
    Arc<MemoryObjectGateway>,
) {
    let (file_access, files, objects) = build_service(script);
    let state = Arc::new(AppState {
        file_access,
        config: test_config(),
    });
    (state, files, objects)
}
