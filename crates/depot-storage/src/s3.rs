use crate::keys;
use crate::traits::{
    CapabilityMethod, ObjectGateway, PresignedCapability, StorageError, StorageResult, UploadGrant,
};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// S3 object gateway
///
/// Issues presigned PUT/GET capabilities and performs direct deletes. Works
/// against AWS S3 or any S3-compatible provider via a custom endpoint.
#[derive(Clone)]
pub struct S3Gateway {
    client: Client,
    bucket: String,
    presign_ttl: Duration,
    allowed_content_types: Vec<String>,
}

impl S3Gateway {
    /// Create a new S3Gateway.
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `presign_ttl` - Lifetime of issued capabilities, shared by PUT and GET
    /// * `allowed_content_types` - Upload content-type policy; empty allows all
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        presign_ttl: Duration,
        allowed_content_types: Vec<String>,
    ) -> StorageResult<Self> {
        if presign_ttl.is_zero() {
            return Err(StorageError::ConfigError(
                "presign TTL must be greater than zero".to_string(),
            ));
        }

        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_retry_mode(RetryMode::Adaptive);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone())
            .load()
            .await;

        // S3-compatible providers need a custom endpoint and path-style addressing
        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .retry_config(retry_config)
                .force_path_style(true);
            if let Some(provider) = config.credentials_provider() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            Client::from_conf(s3_config_builder.build())
        } else {
            Client::new(&config)
        };

        Ok(S3Gateway {
            client,
            bucket,
            presign_ttl,
            allowed_content_types,
        })
    }

    fn presigning_config(&self) -> StorageResult<PresigningConfig> {
        PresigningConfig::builder()
            .expires_in(self.presign_ttl)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    fn expiry(&self) -> StorageResult<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(self.presign_ttl)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;
        Ok(Utc::now() + ttl)
    }
}

/// Case-insensitive content-type policy check. An empty allow-list allows all.
pub fn content_type_allowed(content_type: &str, allowed: &[String]) -> bool {
    allowed.is_empty()
        || allowed
            .iter()
            .any(|a| a.eq_ignore_ascii_case(content_type))
}

#[async_trait]
impl ObjectGateway for S3Gateway {
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
        let expires_at = self.expiry()?;
        let start = std::time::Instant::now();

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&storage_key)
            .content_type(content_type)
            .presigned(self.presigning_config()?)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload presign failed"
                );
                StorageError::PresignFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            expires_at = %expires_at,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Issued presigned PUT capability"
        );

        Ok(UploadGrant {
            capability: PresignedCapability {
                url: presigned.uri().to_string(),
                method: CapabilityMethod::Put,
                expires_at,
            },
            storage_key,
        })
    }

    async fn issue_download_capability(
        &self,
        storage_key: &str,
    ) -> StorageResult<PresignedCapability> {
        let expires_at = self.expiry()?;
        let start = std::time::Instant::now();

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .response_content_disposition("inline")
            .presigned(self.presigning_config()?)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download presign failed"
                );
                StorageError::PresignFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            expires_at = %expires_at,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Issued presigned GET capability"
        );

        Ok(PresignedCapability {
            url: presigned.uri().to_string(),
            method: CapabilityMethod::Get,
            expires_at,
        })
    }

    async fn delete_object(&self, storage_key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        // S3 DeleteObject succeeds for missing keys, which gives idempotency for free
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_allowed() {
        let allowed = vec!["image/png".to_string(), "image/jpeg".to_string()];
        assert!(content_type_allowed("image/png", &allowed));
        assert!(content_type_allowed("IMAGE/PNG", &allowed));
        assert!(!content_type_allowed("text/html", &allowed));
    }

    #[test]
    fn test_empty_policy_allows_all() {
        assert!(content_type_allowed("anything/at-all", &[]));
    }
}
