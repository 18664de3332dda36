//! Depot API Library
//!
//! HTTP handlers, auth middleware, the file-access orchestrator, and
//! application setup.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
pub use services::FileAccessService;
