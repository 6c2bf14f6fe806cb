use sheettrack_core::normalize::flat::{normalize_flat, RawFlatQuestion};
use sheettrack_core::normalize::nested::{normalize_nested, RawTopic};
use serde_json::json;

fn nested_fixture() -> Vec<RawTopic> {
    serde_json::from_value(json!([
        {
            "_id": "t1",
            "name": "Arrays",
            "sub_topics": [
                {
                    "_id": "s1",
                    "name": "Basics",
                    "questions": [
                        { "_id": "q1", "title": "Two Sum" },
                        { "_id": "q2", "title": "Max Subarray" }
                    ]
                },
                { "_id": "s2", "name": "Sorting" }
            ]
        },
        { "_id": "t2", "name": "Graphs" }
    ]))
    .unwrap()
}

#[test]
fn nested_normalization_is_a_structural_copy() {
    let topics = normalize_nested(nested_fixture());

    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0].id, "t1");
    assert_eq!(topics[0].title, "Arrays");
    assert_eq!(topics[0].sub_topics.len(), 2);

    let basics = &topics[0].sub_topics[0];
    assert_eq!(basics.id, "s1");
    assert_eq!(basics.questions.len(), 2);
    assert_eq!(basics.questions[0].id, "q1");
    assert_eq!(basics.questions[0].title, "Two Sum");
    assert_eq!(basics.questions[1].id, "q2");
}

#[test]
fn nested_normalization_defaults_missing_sequences_to_empty() {
    let topics = normalize_nested(nested_fixture());

    // "Sorting" had no questions field, "Graphs" no sub_topics field.
    assert!(topics[0].sub_topics[1].questions.is_empty());
    assert!(topics[1].sub_topics.is_empty());
}

#[test]
fn nested_normalization_emits_unsolved_questions() {
    let topics = normalize_nested(nested_fixture());
    for topic in &topics {
        for sub in &topic.sub_topics {
            assert!(sub.questions.iter().all(|q| !q.solved));
        }
    }
}

#[test]
fn nested_normalization_preserves_question_count() {
    let raw = nested_fixture();
    let raw_count: usize = raw
        .iter()
        .flat_map(|t| t.sub_topics.iter())
        .map(|s| s.questions.len())
        .sum();

    let topics = normalize_nested(raw);
    let out_count: usize = topics
        .iter()
        .flat_map(|t| t.sub_topics.iter())
        .map(|s| s.questions.len())
        .sum();

    assert_eq!(raw_count, out_count);
}

fn flat_fixture() -> Vec<RawFlatQuestion> {
    serde_json::from_value(json!([
        {
            "_id": "x",
            "title": "X",
            "topic": "A",
            "subTopic": "a1",
            "isSolved": true,
            "questionId": {
                "difficulty": "Easy",
                "platform": "LeetCode",
                "problemUrl": "https://example.com/x"
            }
        },
        { "_id": "y", "title": "Y", "topic": "B", "subTopic": "b1" },
        { "_id": "z", "title": "Z", "topic": "A", "subTopic": "a1" }
    ]))
    .unwrap()
}

#[test]
fn flat_grouping_uses_first_seen_order() {
    let topics = normalize_flat(flat_fixture());

    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);

    let a_questions: Vec<&str> = topics[0].sub_topics[0]
        .questions
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(a_questions, ["x", "z"]);
}

#[test]
fn flat_grouping_preserves_ids_titles_and_count() {
    let topics = normalize_flat(flat_fixture());

    let flattened: Vec<(&str, &str)> = topics
        .iter()
        .flat_map(|t| t.sub_topics.iter())
        .flat_map(|s| s.questions.iter())
        .map(|q| (q.id.as_str(), q.title.as_str()))
        .collect();
    assert_eq!(flattened.len(), 3);
    assert!(flattened.contains(&("x", "X")));
    assert!(flattened.contains(&("y", "Y")));
    assert!(flattened.contains(&("z", "Z")));
}

#[test]
fn flat_grouping_carries_solved_flag_and_metadata() {
    let topics = normalize_flat(flat_fixture());

    let x = &topics[0].sub_topics[0].questions[0];
    assert!(x.solved);
    assert_eq!(x.difficulty.as_deref(), Some("Easy"));
    assert_eq!(x.platform.as_deref(), Some("LeetCode"));
    assert_eq!(x.link.as_deref(), Some("https://example.com/x"));

    // y had no solved indicator and no metadata object.
    let y = &topics[1].sub_topics[0].questions[0];
    assert!(!y.solved);
    assert!(y.difficulty.is_none());
    assert!(y.platform.is_none());
    assert!(y.link.is_none());
}

#[test]
fn flat_grouping_defaults_untagged_records() {
    let records: Vec<RawFlatQuestion> =
        serde_json::from_value(json!([{ "_id": "q", "title": "Loose" }])).unwrap();
    let topics = normalize_flat(records);

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].title, "Others");
    assert_eq!(topics[0].id, "Others");
    assert_eq!(topics[0].sub_topics[0].title, "General");
    assert_eq!(topics[0].sub_topics[0].questions[0].id, "q");
}

#[test]
fn flat_grouping_keeps_group_names_as_ids() {
    let topics = normalize_flat(flat_fixture());
    assert_eq!(topics[0].id, "A");
    assert_eq!(topics[0].sub_topics[0].id, "a1");
}
