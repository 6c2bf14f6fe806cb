//! Nested-shape normalizer (remote sheet format).
//!
//! # Responsibility
//! - Deserialize the wire format of the public sheet endpoint
//!   (`topics[].sub_topics[].questions[]`).
//! - Map it one-to-one into the canonical tree.
//!
//! # Invariants
//! - Identifiers and ordering are carried through unchanged.
//! - Missing `sub_topics`/`questions` sequences become empty, never null.
//! - Every emitted question starts unsolved.

use crate::model::sheet::{Question, SubTopic, Topic};
use serde::Deserialize;

/// Raw topic record as sent by the sheet endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTopic {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub_topics: Vec<RawSubTopic>,
}

/// Raw sub-topic record nested under [`RawTopic`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubTopic {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// Raw question record nested under [`RawSubTopic`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

/// Maps the nested wire shape into the canonical tree.
///
/// Direct structural copy: one output entity per input record, in input
/// order. Upstream has no solved flag in this shape, so questions come out
/// `solved = false`.
pub fn normalize_nested(raw_topics: Vec<RawTopic>) -> Vec<Topic> {
    raw_topics
        .into_iter()
        .map(|raw| Topic {
            id: raw.id,
            title: raw.name,
            sub_topics: raw
                .sub_topics
                .into_iter()
                .map(|sub| SubTopic {
                    id: sub.id,
                    title: sub.name,
                    questions: sub
                        .questions
                        .into_iter()
                        .map(|q| Question::with_id(q.id, q.title))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
