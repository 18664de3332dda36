pub mod file_access;

pub use file_access::{CreatedFile, DeleteOutcome, FileAccessService};
