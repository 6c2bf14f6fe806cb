//! Canonical domain model for the question sheet.
//!
//! # Responsibility
//! - Define the Topic -> SubTopic -> Question tree consumed by every other
//!   module.
//! - Keep one serialized shape shared by storage, import/export and the
//!   normalizers' output.
//!
//! # Invariants
//! - Identifiers are unique within their sibling scope.
//! - Sequence order of sub-topics and questions is significant and must
//!   survive serialization round-trips verbatim.

pub mod sheet;
