//! Configuration module
//!
//! Environment-driven configuration for the API and its remote collaborators:
//! database, object store presigning, and the identity service client.

use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PRESIGN_TTL_SECS: u64 = 900;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 3;
const DEFAULT_IDENTITY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_IDENTITY_RETRY_DELAY_MS: u64 = 200;
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png,image/webp,image/gif,video/mp4,audio/mpeg,application/pdf";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub master_api_key: String,
    // Object store configuration
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub presign_ttl_seconds: u64,
    pub allowed_content_types: Vec<String>,
    // Identity service configuration
    pub identity_base_url: String,
    pub identity_timeout_seconds: u64,
    pub identity_max_attempts: u32,
    pub identity_retry_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            environment,
            cors_origins,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DB_TIMEOUT_SECS),
            master_api_key: env::var("MASTER_API_KEY").context("MASTER_API_KEY must be set")?,
            s3_bucket: env::var("S3_BUCKET").context("S3_BUCKET must be set")?,
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            presign_ttl_seconds: env::var("PRESIGN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PRESIGN_TTL_SECS),
            allowed_content_types,
            identity_base_url: env::var("IDENTITY_SERVICE_URL")
                .context("IDENTITY_SERVICE_URL must be set")?,
            identity_timeout_seconds: env::var("IDENTITY_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
            identity_max_attempts: env::var("IDENTITY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_IDENTITY_MAX_ATTEMPTS),
            identity_retry_delay_ms: env::var("IDENTITY_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_IDENTITY_RETRY_DELAY_MS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on values that would misbehave at runtime.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.presign_ttl_seconds == 0 {
            anyhow::bail!("PRESIGN_TTL_SECONDS must be greater than zero");
        }
        if self.identity_max_attempts == 0 {
            anyhow::bail!("IDENTITY_MAX_ATTEMPTS must be at least 1");
        }
        if self.master_api_key.len() < 16 {
            anyhow::bail!("MASTER_API_KEY must be at least 16 characters");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn presign_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_ttl_seconds)
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(self.identity_timeout_seconds)
    }

    pub fn identity_retry_delay(&self) -> Duration {
        Duration::from_millis(self.identity_retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 3000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: "postgresql://localhost/depot".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            master_api_key: "test-master-key-0123456789".to_string(),
            s3_bucket: "depot-files".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            presign_ttl_seconds: 900,
            allowed_content_types: vec!["image/png".to_string()],
            identity_base_url: "http://localhost:4000".to_string(),
            identity_timeout_seconds: 3,
            identity_max_attempts: 3,
            identity_retry_delay_ms: 200,
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = base_config();
        config.presign_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = base_config();
        config.identity_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = base_config();
        assert_eq!(config.presign_ttl(), Duration::from_secs(900));
        assert_eq!(config.identity_timeout(), Duration::from_secs(3));
        assert_eq!(config.identity_retry_delay(), Duration::from_millis(200));
    }
}
