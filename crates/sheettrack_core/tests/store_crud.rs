use rusqlite::Connection;
use sheettrack_core::db::open_db_in_memory;
use sheettrack_core::{Question, SheetStore, SqliteRecordRepository, SubTopic, Topic};

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn seeded_store(conn: &Connection) -> SheetStore<SqliteRecordRepository<'_>> {
    let mut sub = SubTopic::with_id("s1", "Basics");
    sub.questions.push(Question::with_id("q0", "Zero"));
    sub.questions.push(Question::with_id("q1", "One"));
    sub.questions.push(Question::with_id("q2", "Two"));

    let mut topic = Topic::with_id("t1", "Arrays");
    topic.sub_topics.push(sub);
    topic.sub_topics.push(SubTopic::with_id("s2", "Sorting"));

    let repo = SqliteRecordRepository::try_new(conn).unwrap();
    SheetStore::load(repo, vec![topic, Topic::with_id("t2", "Graphs")]).unwrap()
}

#[test]
fn add_topic_appends_with_fresh_id_and_empty_subtopics() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    let id = store.add_topic("Strings").unwrap();
    let added = store.topics().last().unwrap();
    assert_eq!(added.id, id);
    assert_eq!(added.title, "Strings");
    assert!(added.sub_topics.is_empty());
    assert_ne!(store.topics()[0].id, id);
}

#[test]
fn edit_and_delete_topic() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    store.edit_topic("t2", "Graph Theory").unwrap();
    assert_eq!(store.topics()[1].title, "Graph Theory");

    store.delete_topic("t2").unwrap();
    assert_eq!(store.topics().len(), 1);
    assert_eq!(store.topics()[0].id, "t1");
}

#[test]
fn sub_topic_crud_is_scoped_to_parent() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    let id = store.add_sub_topic("t2", "Shortest Paths").unwrap().unwrap();
    assert_eq!(store.topics()[1].sub_topics[0].id, id);

    store.edit_sub_topic("t1", "s2", "Searching").unwrap();
    assert_eq!(store.topics()[0].sub_topics[1].title, "Searching");

    store.delete_sub_topic("t1", "s2").unwrap();
    let subs: Vec<&str> = store.topics()[0]
        .sub_topics
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(subs, ["s1"]);

    // The other topic's new sub-topic is untouched.
    assert_eq!(store.topics()[1].sub_topics.len(), 1);
}

#[test]
fn add_sub_topic_under_missing_parent_is_a_noop() {
    let conn = setup();
    let mut store = seeded_store(&conn);
    let before = store.topics().to_vec();

    let created = store.add_sub_topic("missing", "Nowhere").unwrap();
    assert!(created.is_none());
    assert_eq!(store.topics(), before.as_slice());
}

#[test]
fn question_crud_is_scoped_by_path() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    let id = store.add_question("t1", "s2", "Merge Sort").unwrap().unwrap();
    assert_eq!(store.topics()[0].sub_topics[1].questions[0].id, id);
    assert!(!store.topics()[0].sub_topics[1].questions[0].solved);

    store.edit_question("t1", "s1", "q1", "One Renamed").unwrap();
    assert_eq!(store.topics()[0].sub_topics[0].questions[1].title, "One Renamed");

    store.delete_question("t1", "s1", "q1").unwrap();
    let ids: Vec<&str> = store.topics()[0].sub_topics[0]
        .questions
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(ids, ["q0", "q2"]);
}

#[test]
fn toggle_flips_exactly_one_question() {
    let conn = setup();
    let mut store = seeded_store(&conn);
    let before = store.topics().to_vec();

    store.toggle_question("t1", "s1", "q1").unwrap();

    let after = store.topics();
    assert!(after[0].sub_topics[0].questions[1].solved);

    // Everything except that one flag is unchanged.
    let mut expected = before.clone();
    expected[0].sub_topics[0].questions[1].solved = true;
    assert_eq!(after, expected.as_slice());

    // Toggling again restores the original tree.
    store.toggle_question("t1", "s1", "q1").unwrap();
    assert_eq!(store.topics(), before.as_slice());
}

#[test]
fn scoped_mutations_with_unresolved_paths_leave_tree_unchanged() {
    let conn = setup();
    let mut store = seeded_store(&conn);
    let before = store.topics().to_vec();

    store.edit_topic("missing", "X").unwrap();
    store.delete_topic("missing").unwrap();
    store.edit_sub_topic("t1", "missing", "X").unwrap();
    store.delete_sub_topic("missing", "s1").unwrap();
    store.edit_question("t1", "s1", "missing", "X").unwrap();
    store.delete_question("t1", "missing", "q0").unwrap();
    store.toggle_question("missing", "s1", "q0").unwrap();
    assert!(store.add_question("t1", "missing", "X").unwrap().is_none());

    assert_eq!(store.topics(), before.as_slice());
}

#[test]
fn reorder_questions_moves_single_element() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    store.reorder_questions("t1", "s1", 0, 2).unwrap();
    let ids: Vec<&str> = store.topics()[0].sub_topics[0]
        .questions
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(ids, ["q1", "q2", "q0"]);
}

#[test]
fn reorder_sub_topics_moves_single_element() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    store.reorder_sub_topics("t1", 1, 0).unwrap();
    let ids: Vec<&str> = store.topics()[0]
        .sub_topics
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, ["s2", "s1"]);
}

#[test]
fn reorder_for_unknown_topic_is_a_noop() {
    let conn = setup();
    let mut store = seeded_store(&conn);
    let before = store.topics().to_vec();

    store.reorder_sub_topics("missing", 0, 1).unwrap();
    store.reorder_questions("missing", "s1", 0, 1).unwrap();
    assert_eq!(store.topics(), before.as_slice());
}

#[test]
fn mutations_are_durable_across_reload() {
    let conn = setup();
    let saved = {
        let mut store = seeded_store(&conn);
        store.toggle_question("t1", "s1", "q2").unwrap();
        store.reorder_questions("t1", "s1", 2, 0).unwrap();
        store.topics().to_vec()
    };

    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let reloaded = SheetStore::load(repo, Vec::new()).unwrap();
    assert_eq!(reloaded.topics(), saved.as_slice());
    assert_eq!(reloaded.topics()[0].sub_topics[0].questions[0].id, "q2");
    assert!(reloaded.topics()[0].sub_topics[0].questions[0].solved);
}

#[test]
fn set_topics_replaces_wholesale() {
    let conn = setup();
    let mut store = seeded_store(&conn);

    let replacement = vec![Topic::with_id("fresh", "Fresh")];
    store.set_topics(replacement.clone()).unwrap();
    assert_eq!(store.topics(), replacement.as_slice());
}

#[test]
fn progress_tracks_solved_counts() {
    let conn = setup();
    let mut store = seeded_store(&conn);
    assert_eq!(store.progress().total, 3);
    assert_eq!(store.progress().solved, 0);

    store.toggle_question("t1", "s1", "q0").unwrap();
    let progress = store.progress();
    assert_eq!(progress.solved, 1);
    assert_eq!(progress.percent(), 33);
}
