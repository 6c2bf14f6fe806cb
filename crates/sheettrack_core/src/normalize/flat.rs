//! Flat-shape normalizer (bundled dataset format).
//!
//! # Responsibility
//! - Group a flat, ordered question list tagged with topic/sub-topic names
//!   into the canonical tree.
//!
//! # Invariants
//! - Topic and sub-topic emission order is first-seen order from a single
//!   ordered scan; grouping never sorts.
//! - Records with no usable topic/sub-topic name fall into `Others`/`General`.
//! - Absent solved indicator means unsolved.

use crate::model::sheet::{Question, SubTopic, Topic};
use serde::Deserialize;
use std::collections::HashMap;

/// Fallback topic name for untagged records.
pub const DEFAULT_TOPIC: &str = "Others";
/// Fallback sub-topic name for untagged records.
pub const DEFAULT_SUB_TOPIC: &str = "General";

/// Raw record of the flat upstream dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlatQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub is_solved: Option<bool>,
    #[serde(default)]
    pub question_id: Option<RawQuestionMeta>,
}

/// Nested metadata object attached to some flat records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestionMeta {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub problem_url: Option<String>,
}

/// Groups flat records into the canonical tree.
///
/// A topic's position in the output is the position at which its first
/// question appeared in the input; the same holds for sub-topics within a
/// topic. Group identifiers are the group names, matching the upstream
/// dataset convention.
pub fn normalize_flat(records: Vec<RawFlatQuestion>) -> Vec<Topic> {
    let mut topics: Vec<Topic> = Vec::new();
    let mut topic_slots: HashMap<String, usize> = HashMap::new();
    let mut sub_slots: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let topic_name = group_name(record.topic.as_deref(), DEFAULT_TOPIC);
        let sub_name = group_name(record.sub_topic.as_deref(), DEFAULT_SUB_TOPIC);

        let topic_at = *topic_slots.entry(topic_name.clone()).or_insert_with(|| {
            topics.push(Topic::with_id(topic_name.clone(), topic_name.clone()));
            topics.len() - 1
        });

        let sub_key = (topic_name, sub_name.clone());
        let sub_at = *sub_slots.entry(sub_key).or_insert_with(|| {
            let subs = &mut topics[topic_at].sub_topics;
            subs.push(SubTopic::with_id(sub_name.clone(), sub_name.clone()));
            subs.len() - 1
        });

        let meta = record.question_id.unwrap_or_default();
        topics[topic_at].sub_topics[sub_at].questions.push(Question {
            id: record.id,
            title: record.title,
            solved: record.is_solved.unwrap_or(false),
            difficulty: meta.difficulty,
            platform: meta.platform,
            link: meta.problem_url,
        });
    }

    topics
}

// Blank names get the same fallback as missing ones.
fn group_name(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{group_name, DEFAULT_SUB_TOPIC, DEFAULT_TOPIC};

    #[test]
    fn group_name_falls_back_on_missing_or_blank() {
        assert_eq!(group_name(None, DEFAULT_TOPIC), "Others");
        assert_eq!(group_name(Some("  "), DEFAULT_SUB_TOPIC), "General");
        assert_eq!(group_name(Some("Arrays"), DEFAULT_TOPIC), "Arrays");
    }
}
