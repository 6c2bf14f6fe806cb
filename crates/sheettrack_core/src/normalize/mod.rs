//! Raw-input normalizers.
//!
//! # Responsibility
//! - Convert externally supplied JSON shapes into the canonical sheet tree.
//! - Tolerate missing optional fields; default instead of failing.
//!
//! # Invariants
//! - Normalizers are pure: no I/O, no panics on well-typed input.
//! - Question count and per-question id/title are preserved exactly.
//! - Emitted ordering is the source ordering (first-seen for grouped input),
//!   never a sort.

pub mod flat;
pub mod nested;

pub use flat::{normalize_flat, RawFlatQuestion, RawQuestionMeta};
pub use nested::{normalize_nested, RawQuestion, RawSubTopic, RawTopic};
