//! API constants.

/// API base path prefix, including version.
pub const API_PREFIX: &str = "/api/v0";
