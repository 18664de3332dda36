//! Service and client construction.

use anyhow::{Context, Result};
use depot_core::Config;
use depot_db::{FileStore, PgFileStore};
use depot_identity::{HttpIdentityClient, IdentityClientConfig, IdentityLookup};
use depot_storage::{ObjectGateway, S3Gateway};
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::FileAccessService;
use crate::state::AppState;

/// Build all remote-service clients and assemble the application state.
pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let file_store: Arc<dyn FileStore> = Arc::new(PgFileStore::new(pool));

    let object_gateway: Arc<dyn ObjectGateway> = Arc::new(
        S3Gateway::new(
            config.s3_bucket.clone(),
            config.s3_region.clone(),
            config.s3_endpoint.clone(),
            config.presign_ttl(),
            config.allowed_content_types.clone(),
        )
        .await
        .context("Failed to create object store gateway")?,
    );

    let identity: Arc<dyn IdentityLookup> = Arc::new(
        HttpIdentityClient::new(IdentityClientConfig {
            base_url: config.identity_base_url.clone(),
            timeout: config.identity_timeout(),
            max_attempts: config.identity_max_attempts,
            retry_delay: config.identity_retry_delay(),
        })
        .context("Failed to create identity client")?,
    );

    let file_access = FileAccessService::new(file_store, object_gateway, identity);

    tracing::info!(
        bucket = %config.s3_bucket,
        presign_ttl_seconds = config.presign_ttl_seconds,
        identity_url = %config.identity_base_url,
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        file_access,
        config: config.clone(),
    }))
}
