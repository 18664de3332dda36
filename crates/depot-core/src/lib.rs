//! Core domain types for Depot: models, error taxonomy, and configuration.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
