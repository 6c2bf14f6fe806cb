//! Compiled-in default sheet.
//!
//! # Responsibility
//! - Provide the bundled tree used on first run and as the malformed-storage
//!   fallback.
//!
//! # Invariants
//! - The embedded JSON is valid by construction; parsing it is a build
//!   invariant, checked by tests.
//! - Both a bare top-level array and a `{ "topics": [...] }` wrapper are
//!   accepted.

use crate::model::sheet::Topic;
use once_cell::sync::Lazy;
use serde_json::Value;

const DEFAULT_SHEET_JSON: &str = include_str!("../assets/default_sheet.json");

static BUNDLED: Lazy<Vec<Topic>> =
    Lazy::new(|| parse_bundled(DEFAULT_SHEET_JSON).expect("valid bundled sheet"));

/// Returns a fresh copy of the bundled default tree.
pub fn bundled_topics() -> Vec<Topic> {
    BUNDLED.clone()
}

fn parse_bundled(text: &str) -> Result<Vec<Topic>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    let topics = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove("topics").unwrap_or_else(|| Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    serde_json::from_value(topics)
}

#[cfg(test)]
mod tests {
    use super::{bundled_topics, parse_bundled};

    #[test]
    fn bundled_sheet_parses_and_is_nonempty() {
        let topics = bundled_topics();
        assert!(!topics.is_empty());
        for topic in &topics {
            assert!(!topic.id.is_empty());
            assert!(!topic.title.is_empty());
        }
    }

    #[test]
    fn accepts_wrapped_topics_object() {
        let wrapped = r#"{ "topics": [ { "id": "t", "title": "T", "subTopics": [] } ] }"#;
        let topics = parse_bundled(wrapped).unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, "t");
    }

    #[test]
    fn object_without_topics_yields_empty_tree() {
        let topics = parse_bundled(r#"{ "version": 2 }"#).unwrap();
        assert!(topics.is_empty());
    }
}
