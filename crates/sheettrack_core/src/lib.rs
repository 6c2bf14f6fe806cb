//! Core domain logic for sheettrack.
//! This crate is the single source of truth for sheet normalization,
//! persistence and mutation invariants.

pub mod bundled;
pub mod db;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod repo;
pub mod store;

pub use bundled::bundled_topics;
pub use exchange::{
    export_json, export_to_file, import_from_file, import_json, ExportError, ImportError,
    EXPORT_FILE_NAME,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::sheet::{Progress, Question, SubTopic, Topic};
pub use normalize::{normalize_flat, normalize_nested, RawFlatQuestion, RawTopic};
pub use remote::{fetch_default_sheet, fetch_sheet, FetchError, DEFAULT_SHEET_URL};
pub use repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use store::{SheetStore, StoreError, StoreResult, Theme, SHEET_RECORD_KEY, THEME_RECORD_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
