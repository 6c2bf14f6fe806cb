//! Sheet store: load/merge/save plus the CRUD and reorder mutators.
//!
//! # Responsibility
//! - Implement the deterministic startup load (bundled vs saved, with
//!   reconciliation of newly bundled topics).
//! - Provide the fixed set of mutating operations over the canonical tree.
//!
//! # Invariants
//! - Mutators build a new tree and persist it before swapping it in; sibling
//!   entities are carried over unchanged.
//! - Scoped mutations whose id path does not resolve are silent no-ops at
//!   the API level, logged at debug level.
//! - A loaded store always has its record key present in storage.

use crate::model::sheet::{Progress, Question, SubTopic, Topic};
use crate::repo::record_repo::{RecordRepository, RepoError};
use crate::store::theme::{Theme, THEME_RECORD_KEY};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The single durable record key holding the serialized tree.
///
/// Legacy key variants from earlier revisions of the data format are not
/// read or migrated.
pub const SHEET_RECORD_KEY: &str = "question-sheet-data";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
///
/// Malformed *stored* data is not an error (the store falls back to the
/// bundled tree); these cover failures to persist or serialize.
#[derive(Debug)]
pub enum StoreError {
    /// Durable write/read failure.
    Repo(RepoError),
    /// The active tree could not be serialized.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize sheet: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// State container owning the canonical tree.
///
/// There is exactly one writer; callers hold the store by `&mut` and every
/// mutation completes its durable write before returning.
pub struct SheetStore<R: RecordRepository> {
    repo: R,
    topics: Vec<Topic>,
}

impl<R: RecordRepository> SheetStore<R> {
    /// Loads the active tree from storage, falling back to `bundled`.
    ///
    /// Deterministic decision order:
    /// 1. no stored record -> bundled tree, persisted immediately;
    /// 2. stored record unparseable or an empty sequence -> bundled tree,
    ///    persisted (logged, never fatal);
    /// 3. stored record valid and non-empty -> saved tree, with bundled
    ///    topics absent from it (matched by id or title) appended at the
    ///    end and the merged result persisted.
    pub fn load(mut repo: R, bundled: Vec<Topic>) -> StoreResult<Self> {
        let topics = match repo.read(SHEET_RECORD_KEY)? {
            None => {
                info!("event=sheet_load module=store status=ok source=bundled reason=fresh");
                persist(&mut repo, &bundled)?;
                bundled
            }
            Some(raw) => match serde_json::from_str::<Vec<Topic>>(&raw) {
                Ok(saved) if !saved.is_empty() => {
                    let (merged, appended) = reconcile(saved, bundled);
                    if appended > 0 {
                        persist(&mut repo, &merged)?;
                    }
                    info!(
                        "event=sheet_load module=store status=ok source=saved appended={appended}"
                    );
                    merged
                }
                Ok(_) => {
                    warn!("event=sheet_load module=store status=fallback reason=empty_record");
                    persist(&mut repo, &bundled)?;
                    bundled
                }
                Err(err) => {
                    warn!(
                        "event=sheet_load module=store status=fallback reason=malformed_record error={err}"
                    );
                    persist(&mut repo, &bundled)?;
                    bundled
                }
            },
        };

        Ok(Self { repo, topics })
    }

    /// Read access to the active tree.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Completion statistics over the active tree.
    pub fn progress(&self) -> Progress {
        Progress::of(&self.topics)
    }

    /// Wholesale tree replacement (import and reconciliation callers).
    pub fn set_topics(&mut self, topics: Vec<Topic>) -> StoreResult<()> {
        self.commit(topics)
    }

    /// Deletes the stored record and makes `bundled` the active tree.
    pub fn reset_to_bundled(&mut self, bundled: Vec<Topic>) -> StoreResult<()> {
        self.repo.delete(SHEET_RECORD_KEY)?;
        self.commit(bundled)
    }

    /// Appends a new empty topic; returns its generated id.
    pub fn add_topic(&mut self, title: impl Into<String>) -> StoreResult<String> {
        let topic = Topic::new(title);
        let id = topic.id.clone();
        let mut next = self.topics.clone();
        next.push(topic);
        self.commit(next)?;
        Ok(id)
    }

    /// Retitles a topic. Unknown ids are a logged no-op.
    pub fn edit_topic(&mut self, topic_id: &str, title: &str) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_topic(topic_id, &mut hit, |topic| {
            topic.title = title.to_string();
        });
        self.commit_if_hit(hit, next, "edit_topic", topic_id)
    }

    /// Removes a topic. Unknown ids are a logged no-op.
    pub fn delete_topic(&mut self, topic_id: &str) -> StoreResult<()> {
        let next: Vec<Topic> = self
            .topics
            .iter()
            .filter(|topic| topic.id != topic_id)
            .cloned()
            .collect();
        let hit = next.len() != self.topics.len();
        self.commit_if_hit(hit, next, "delete_topic", topic_id)
    }

    /// Appends an empty sub-topic under `topic_id`.
    ///
    /// Returns the generated id, or `None` when the parent does not exist.
    pub fn add_sub_topic(
        &mut self,
        topic_id: &str,
        title: impl Into<String>,
    ) -> StoreResult<Option<String>> {
        let sub = SubTopic::new(title);
        let id = sub.id.clone();
        let mut hit = false;
        let next = self.map_topic(topic_id, &mut hit, |topic| {
            topic.sub_topics.push(sub.clone());
        });
        self.commit_if_hit(hit, next, "add_sub_topic", topic_id)?;
        Ok(hit.then_some(id))
    }

    /// Retitles a sub-topic. Unresolved paths are a logged no-op.
    pub fn edit_sub_topic(&mut self, topic_id: &str, sub_id: &str, title: &str) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_sub_topic(topic_id, sub_id, &mut hit, |sub| {
            sub.title = title.to_string();
        });
        self.commit_if_hit(hit, next, "edit_sub_topic", sub_id)
    }

    /// Removes a sub-topic. Unresolved paths are a logged no-op.
    pub fn delete_sub_topic(&mut self, topic_id: &str, sub_id: &str) -> StoreResult<()> {
        let hit = self.sub_topic_exists(topic_id, sub_id);
        let mut parent_hit = false;
        let next = self.map_topic(topic_id, &mut parent_hit, |topic| {
            topic.sub_topics.retain(|sub| sub.id != sub_id);
        });
        self.commit_if_hit(hit, next, "delete_sub_topic", sub_id)
    }

    /// Appends an unsolved question under `(topic_id, sub_id)`.
    ///
    /// Returns the generated id, or `None` when the path does not resolve.
    pub fn add_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        title: impl Into<String>,
    ) -> StoreResult<Option<String>> {
        let question = Question::new(title);
        let id = question.id.clone();
        let mut hit = false;
        let next = self.map_sub_topic(topic_id, sub_id, &mut hit, |sub| {
            sub.questions.push(question.clone());
        });
        self.commit_if_hit(hit, next, "add_question", sub_id)?;
        Ok(hit.then_some(id))
    }

    /// Retitles a question. Unresolved paths are a logged no-op.
    pub fn edit_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
        title: &str,
    ) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_question(topic_id, sub_id, question_id, &mut hit, |question| {
            question.title = title.to_string();
        });
        self.commit_if_hit(hit, next, "edit_question", question_id)
    }

    /// Removes a question. Unresolved paths are a logged no-op.
    pub fn delete_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
    ) -> StoreResult<()> {
        let hit = self.question_exists(topic_id, sub_id, question_id);
        let mut sub_hit = false;
        let next = self.map_sub_topic(topic_id, sub_id, &mut sub_hit, |sub| {
            sub.questions.retain(|q| q.id != question_id);
        });
        self.commit_if_hit(hit, next, "delete_question", question_id)
    }

    /// Flips one question's solved flag. Unresolved paths are a logged no-op.
    pub fn toggle_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
    ) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_question(topic_id, sub_id, question_id, &mut hit, |question| {
            question.solved = !question.solved;
        });
        self.commit_if_hit(hit, next, "toggle_question", question_id)
    }

    /// Moves the sub-topic at `from` to position `to` within one topic.
    ///
    /// Single-element move: the element is removed at `from` and reinserted
    /// at `to`. An unknown `topic_id` is a logged no-op.
    ///
    /// # Panics
    /// Out-of-range indices are a caller contract violation and panic.
    pub fn reorder_sub_topics(
        &mut self,
        topic_id: &str,
        from: usize,
        to: usize,
    ) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_topic(topic_id, &mut hit, |topic| {
            let moved = topic.sub_topics.remove(from);
            topic.sub_topics.insert(to, moved);
        });
        self.commit_if_hit(hit, next, "reorder_sub_topics", topic_id)
    }

    /// Moves the question at `from` to position `to` within one sub-topic.
    ///
    /// Same move semantics and panics as [`Self::reorder_sub_topics`].
    pub fn reorder_questions(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        from: usize,
        to: usize,
    ) -> StoreResult<()> {
        let mut hit = false;
        let next = self.map_sub_topic(topic_id, sub_id, &mut hit, |sub| {
            let moved = sub.questions.remove(from);
            sub.questions.insert(to, moved);
        });
        self.commit_if_hit(hit, next, "reorder_questions", sub_id)
    }

    /// Reads the persisted theme preference; absent or unknown values fall
    /// back to [`Theme::Light`].
    pub fn theme(&self) -> StoreResult<Theme> {
        let theme = match self.repo.read(THEME_RECORD_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("event=theme_read module=store status=fallback value={raw}");
                Theme::Light
            }),
            None => Theme::Light,
        };
        Ok(theme)
    }

    /// Persists the theme preference.
    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<()> {
        self.repo.write(THEME_RECORD_KEY, theme.as_str())?;
        Ok(())
    }

    fn commit(&mut self, next: Vec<Topic>) -> StoreResult<()> {
        persist(&mut self.repo, &next)?;
        self.topics = next;
        Ok(())
    }

    fn commit_if_hit(
        &mut self,
        hit: bool,
        next: Vec<Topic>,
        op: &str,
        id: &str,
    ) -> StoreResult<()> {
        if !hit {
            debug!("event=sheet_mutation module=store status=miss op={op} id={id}");
            return Ok(());
        }
        self.commit(next)
    }

    fn sub_topic_exists(&self, topic_id: &str, sub_id: &str) -> bool {
        self.topics
            .iter()
            .find(|topic| topic.id == topic_id)
            .is_some_and(|topic| topic.sub_topics.iter().any(|sub| sub.id == sub_id))
    }

    fn question_exists(&self, topic_id: &str, sub_id: &str, question_id: &str) -> bool {
        self.topics
            .iter()
            .find(|topic| topic.id == topic_id)
            .and_then(|topic| topic.sub_topics.iter().find(|sub| sub.id == sub_id))
            .is_some_and(|sub| sub.questions.iter().any(|q| q.id == question_id))
    }

    fn map_topic(
        &self,
        topic_id: &str,
        hit: &mut bool,
        mut apply: impl FnMut(&mut Topic),
    ) -> Vec<Topic> {
        self.topics
            .iter()
            .map(|topic| {
                if topic.id != topic_id {
                    return topic.clone();
                }
                *hit = true;
                let mut edited = topic.clone();
                apply(&mut edited);
                edited
            })
            .collect()
    }

    fn map_sub_topic(
        &self,
        topic_id: &str,
        sub_id: &str,
        hit: &mut bool,
        mut apply: impl FnMut(&mut SubTopic),
    ) -> Vec<Topic> {
        let mut parent_hit = false;
        self.map_topic(topic_id, &mut parent_hit, |topic| {
            for sub in &mut topic.sub_topics {
                if sub.id == sub_id {
                    *hit = true;
                    apply(sub);
                }
            }
        })
    }

    fn map_question(
        &self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
        hit: &mut bool,
        mut apply: impl FnMut(&mut Question),
    ) -> Vec<Topic> {
        let mut sub_hit = false;
        self.map_sub_topic(topic_id, sub_id, &mut sub_hit, |sub| {
            for question in &mut sub.questions {
                if question.id == question_id {
                    *hit = true;
                    apply(question);
                }
            }
        })
    }
}

fn persist<R: RecordRepository>(repo: &mut R, topics: &[Topic]) -> StoreResult<()> {
    let raw = serde_json::to_string(topics)?;
    repo.write(SHEET_RECORD_KEY, &raw)?;
    Ok(())
}

/// Appends bundled topics absent from the saved tree.
///
/// A bundled topic matched by id *or* title counts as present. Saved topics
/// are never reordered, retitled or dropped. Returns the merged tree and the
/// number of appended topics.
fn reconcile(saved: Vec<Topic>, bundled: Vec<Topic>) -> (Vec<Topic>, usize) {
    let mut merged = saved;
    let mut appended = 0;
    for topic in bundled {
        let present = merged
            .iter()
            .any(|existing| existing.id == topic.id || existing.title == topic.title);
        if !present {
            merged.push(topic);
            appended += 1;
        }
    }
    (merged, appended)
}

#[cfg(test)]
mod tests {
    use super::reconcile;
    use crate::model::sheet::Topic;

    #[test]
    fn reconcile_matches_by_id_or_title() {
        let saved = vec![Topic::with_id("a", "Arrays")];
        let bundled = vec![
            Topic::with_id("a", "Renamed Arrays"),
            Topic::with_id("other-id", "Arrays"),
            Topic::with_id("b", "Graphs"),
        ];
        let (merged, appended) = reconcile(saved, bundled);
        assert_eq!(appended, 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].id, "b");
    }
}
