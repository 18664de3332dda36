//! Remote identity lookup client for Depot.
//!
//! Resolves a user id to a display identity over HTTP with a short overall
//! timeout and a bounded number of retries on transient failure. The identity
//! service is treated as an unreliable dependency: a slow or failing lookup
//! must never stall unrelated requests.

pub mod client;

pub use client::{HttpIdentityClient, IdentityClientConfig, IdentityError, IdentityLookup};
