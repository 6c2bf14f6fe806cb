//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable record-access contract used by the store.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Repository APIs deal in raw record text; interpreting the text (JSON
//!   parsing, fallbacks) belongs to the store layer.

pub mod record_repo;

pub use record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
