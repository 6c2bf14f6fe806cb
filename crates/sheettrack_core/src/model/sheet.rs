//! Sheet tree model.
//!
//! # Responsibility
//! - Define the canonical records for topics, sub-topics and questions.
//! - Provide constructors that generate stable identifiers.
//! - Derive whole-sheet progress statistics.
//!
//! # Invariants
//! - `id` is stable for the lifetime of an entity and never regenerated.
//! - `solved` starts as `false` for newly created questions.
//! - JSON field names (`subTopics`, `solved`, ...) are the canonical external
//!   format and must not drift.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level grouping of the sheet.
///
/// Topics own an ordered sequence of sub-topics; order is user-controlled
/// (drag-and-drop in the UI) and preserved verbatim through persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Stable identifier, unique among sibling topics.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Ordered sub-topic sequence. Never null; missing input maps to empty.
    #[serde(default)]
    pub sub_topics: Vec<SubTopic>,
}

/// Second-level grouping under a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    /// Stable identifier, unique within the parent topic.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Ordered question sequence. Never null; missing input maps to empty.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A single trackable checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier, unique within the parent sub-topic.
    pub id: String,
    /// Display title.
    pub title: String,
    /// User-toggled completion flag.
    #[serde(default)]
    pub solved: bool,
    /// Optional upstream difficulty label, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Optional upstream platform name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Optional problem/resource URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Topic {
    /// Creates an empty topic with a generated identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates an empty topic with a caller-provided identifier.
    ///
    /// Used by normalizers and import paths where identity already exists
    /// upstream.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sub_topics: Vec::new(),
        }
    }

    /// Total number of questions under this topic.
    pub fn question_count(&self) -> usize {
        self.sub_topics.iter().map(|sub| sub.questions.len()).sum()
    }

    /// Number of solved questions under this topic.
    pub fn solved_count(&self) -> usize {
        self.sub_topics
            .iter()
            .map(|sub| sub.questions.iter().filter(|q| q.solved).count())
            .sum()
    }
}

impl SubTopic {
    /// Creates an empty sub-topic with a generated identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates an empty sub-topic with a caller-provided identifier.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
        }
    }
}

impl Question {
    /// Creates an unsolved question with a generated identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates an unsolved question with a caller-provided identifier.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            solved: false,
            difficulty: None,
            platform: None,
            link: None,
        }
    }
}

/// Whole-sheet completion statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of solved questions.
    pub solved: usize,
    /// Total number of questions.
    pub total: usize,
}

impl Progress {
    /// Computes progress over an entire sheet.
    pub fn of(topics: &[Topic]) -> Self {
        let total = topics.iter().map(Topic::question_count).sum();
        let solved = topics.iter().map(Topic::solved_count).sum();
        Self { solved, total }
    }

    /// Completion percentage rounded to the nearest integer.
    ///
    /// An empty sheet reports 0, not a division error.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.solved as f64 / self.total as f64) * 100.0).round() as u32
    }
}
