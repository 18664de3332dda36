//! Durable file-record store for Depot.
//!
//! The [FileStore] trait is the record-store capability the orchestrator
//! depends on; [PgFileStore] is the Postgres implementation. Single-row
//! create/find/delete atomicity comes from the database itself; no extra
//! locking is layered on top.

pub mod file_store;
pub mod postgres;

pub use file_store::{FileStore, NewFileRecord};
pub use postgres::PgFileStore;
