pub mod download_url;
pub mod file_create;
pub mod file_delete;
pub mod upload_url;
