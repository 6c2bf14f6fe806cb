//! Sheet state container and preference storage.
//!
//! # Responsibility
//! - Own the single in-memory canonical tree and its mutation contract.
//! - Decide between bundled and saved data at startup and reconcile them.
//! - Persist the theme preference under its own record key.
//!
//! # Invariants
//! - Every successful mutation is flushed to durable storage before it
//!   returns; on a failed flush the in-memory tree is left unchanged.
//! - The tree is replaced wholesale on mutation, never edited in place.

pub mod sheet_store;
pub mod theme;

pub use sheet_store::{SheetStore, StoreError, StoreResult, SHEET_RECORD_KEY};
pub use theme::{Theme, THEME_RECORD_KEY};
