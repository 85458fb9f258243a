//! The question store and its update rules.
//!
//! Every per-student list is keyed by enrollment number (`Student::student_id`).
//! Mutations run to completion before the next one starts; async callers
//! share the store through [`SharedStore`] and never hold the lock across a
//! network call, so classification results land in the order they resolve.

use std::sync::Arc;

use askboard_common::{normalise_category, snapshot_precision, Question, Student};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{Result, StoreError};
use crate::normalise::normalise_content;
use crate::persistence::{MemoryPersistence, Persistence};
use crate::roster::generate_students;
use crate::snapshot::StoreSnapshot;

pub type SharedStore = Arc<Mutex<QuestionStore>>;

pub struct QuestionStore {
    state: StoreSnapshot,
    persistence: Box<dyn Persistence>,
}

impl QuestionStore {
    /// Rehydrate from `persistence`, or start empty when nothing was saved.
    pub fn open(persistence: impl Persistence + 'static) -> Result<Self> {
        let state = persistence.load()?.unwrap_or_default();
        info!(
            source = %persistence.describe(),
            students = state.students.len(),
            questions = state.question_count(),
            "Question store opened"
        );
        Ok(Self { state, persistence: Box::new(persistence) })
    }

    /// An empty store that keeps its snapshots in memory.
    pub fn in_memory() -> Self {
        Self { state: StoreSnapshot::default(), persistence: Box::new(MemoryPersistence::new()) }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Write-through after a mutation. A failed write leaves the in-memory
    /// state as is; [`QuestionStore::flush`] reports the error to callers
    /// that need to know.
    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.state) {
            error!(target_store = %self.persistence.describe(), error = %e, "Failed to persist question store");
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.persistence.save(&self.state)
    }

    // ── Roster ────────────────────────────────────────────────────────────────

    /// Replace the roster with `count` freshly generated students.
    pub fn generate_and_load_students(&mut self, count: usize, enrollment_prefix: &str) -> Vec<Student> {
        let students = generate_students(count, enrollment_prefix);
        self.state.students = students.clone();
        self.persist();
        info!(count, "Roster generated");
        students
    }

    /// Adopt a roster from elsewhere, e.g. the backend's student list.
    pub fn replace_students(&mut self, students: Vec<Student>) {
        self.state.students = students;
        self.persist();
    }

    pub fn set_current_student(&mut self, student: Student) {
        debug!(student_id = %student.student_id, "Current student set");
        self.state.current_student = Some(student);
        self.persist();
    }

    /// Make the student with this enrollment number current. Returns `false`
    /// (and leaves the current student alone) when the roster has no match.
    pub fn switch_student_by_student_id(&mut self, student_id: &str) -> bool {
        match self.state.students.iter().find(|s| s.student_id == student_id).cloned() {
            Some(student) => {
                self.set_current_student(student);
                true
            }
            None => {
                warn!(student_id, "No student with this enrollment number");
                false
            }
        }
    }

    // ── Questions ─────────────────────────────────────────────────────────────

    /// Append a new, unclassified question for the current student.
    pub fn add_question(&mut self, content: impl Into<String>) -> Result<Question> {
        let student = self.state.current_student.as_ref().ok_or(StoreError::NoCurrentStudent)?;
        let question = Question::new(student, content);
        self.state
            .questions
            .entry(question.student_id.clone())
            .or_default()
            .push(question.clone());
        self.persist();
        debug!(question_id = %question.id, student_id = %question.student_id, "Question added");
        Ok(question)
    }

    /// The student's questions in submission order; empty when none recorded.
    pub fn student_questions(&self, student_id: &str) -> &[Question] {
        self.state.questions.get(student_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every student's questions, each student's run in submission order.
    pub fn all_student_questions(&self) -> Vec<Question> {
        self.state.questions.values().flatten().cloned().collect()
    }

    pub fn unclassified_questions(&self) -> Vec<Question> {
        self.state.questions.values().flatten().filter(|q| !q.is_classified()).cloned().collect()
    }

    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.state.questions.values().flatten().find(|q| q.id == question_id)
    }

    /// Set the category on the question with this id. Returns `false` when no
    /// question matches. Applying the same category again changes nothing.
    pub fn update_question_category(&mut self, question_id: &str, category: impl Into<String>) -> bool {
        let category = normalise_category(Some(category.into()));
        let Some(question) = self.state.questions.values_mut().flatten().find(|q| q.id == question_id) else {
            debug!(question_id, "Category update for unknown question ignored");
            return false;
        };
        if question.category != category {
            question.category = category;
            self.persist();
        }
        true
    }

    /// Upsert classified questions: replace by id within the owning student's
    /// list, append otherwise. Lists are created for students not seen yet.
    /// Timestamps are cut to snapshot precision on the way in.
    pub fn update_questions_categories(&mut self, classified: impl IntoIterator<Item = Question>) {
        let mut touched = 0usize;
        for incoming in classified {
            let incoming = Question {
                category: normalise_category(incoming.category.clone()),
                timestamp: snapshot_precision(incoming.timestamp),
                ..incoming
            };
            let list = self.state.questions.entry(incoming.student_id.clone()).or_default();
            match list.iter_mut().find(|q| q.id == incoming.id) {
                Some(existing) => *existing = incoming,
                None => list.push(incoming),
            }
            touched += 1;
        }
        if touched > 0 {
            self.persist();
        }
        debug!(touched, "Batch category update applied");
    }

    /// Set the category on the first of this student's questions whose
    /// normalised content matches. Two questions with the same normalised text
    /// are indistinguishable here; only the earlier one is updated.
    pub fn update_question_category_by_content(
        &mut self,
        content: &str,
        student_id: &str,
        category: impl Into<String>,
    ) -> bool {
        let wanted = normalise_content(content);
        let category = normalise_category(Some(category.into()));
        let Some(question) = self
            .state
            .questions
            .get_mut(student_id)
            .and_then(|list| list.iter_mut().find(|q| normalise_content(&q.content) == wanted))
        else {
            debug!(student_id, "No question with matching content");
            return false;
        };
        if question.category != category {
            question.category = category;
            self.persist();
        }
        true
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn current_student(&self) -> Option<&Student> {
        self.state.current_student.as_ref()
    }

    pub fn students(&self) -> &[Student] {
        &self.state.students
    }

    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with_current() -> QuestionStore {
        let mut store = QuestionStore::in_memory();
        let roster = store.generate_and_load_students(3, "2024");
        store.set_current_student(roster[0].clone());
        store
    }

    #[test]
    fn test_add_question_requires_current_student() {
        let mut store = QuestionStore::in_memory();
        store.generate_and_load_students(2, "2024");
        let before = store.snapshot().clone();

        let err = store.add_question("What is force?").unwrap_err();
        assert!(matches!(err, StoreError::NoCurrentStudent));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_questions_keyed_by_enrollment_number() {
        let mut store = store_with_current();
        let q = store.add_question("What is force?").unwrap();
        assert_eq!(q.student_id, "20240001");
        assert_eq!(store.student_questions("20240001").len(), 1);
        assert!(store.student_questions("s1").is_empty());
    }

    #[test]
    fn test_unknown_student_has_no_questions() {
        let store = store_with_current();
        assert!(store.student_questions("nobody").is_empty());
    }

    #[test]
    fn test_switch_to_unknown_keeps_current() {
        let mut store = store_with_current();
        assert!(!store.switch_student_by_student_id("29999999"));
        assert_eq!(store.current_student().unwrap().student_id, "20240001");

        assert!(store.switch_student_by_student_id("20240003"));
        assert_eq!(store.current_student().unwrap().student_id, "20240003");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store_with_current();
        store.add_question("a").unwrap();
        let before = store.snapshot().clone();
        assert!(!store.update_question_category("q_missing", "Definition"));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_sentinel_category_clears_label() {
        let mut store = store_with_current();
        let q = store.add_question("a").unwrap();
        store.update_question_category(&q.id, "Definition");
        store.update_question_category(&q.id, "unclassified");
        assert_eq!(store.find_question(&q.id).unwrap().category, None);
    }

    #[test]
    fn test_unclassified_questions_filter() {
        let mut store = store_with_current();
        let a = store.add_question("a").unwrap();
        let b = store.add_question("b").unwrap();
        store.update_question_category(&a.id, "Definition");
        let pending: Vec<_> = store.unclassified_questions().into_iter().map(|q| q.id).collect();
        assert_eq!(pending, vec![b.id]);
    }
}
