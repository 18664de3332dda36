//! Object store gateway for Depot.
//!
//! Issues time-bounded presigned PUT/GET capabilities so clients transfer
//! bytes directly to and from the store; this service never sits in the data
//! path. Keys are owner-namespaced, see [keys].

pub mod keys;
pub mod s3;
pub mod traits;

pub use s3::S3Gateway;
pub use traits::{
    CapabilityMethod, ObjectGateway, PresignedCapability, StorageError, StorageResult, UploadGrant,
};
