pub mod file;
pub mod identity;
pub mod transfer;

pub use file::{FileKind, FileRecord};
pub use identity::{AuthorEnrichment, IdentitySnapshot};
pub use transfer::{
    CreateFileRequest, DeleteFileResponse, DownloadUrlResponse, FileResponse, UploadUrlRequest,
    UploadUrlResponse,
};
