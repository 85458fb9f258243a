//! Teacher-facing review and classification.

use askboard_client::RemoteClassifier;
use askboard_common::{Classification, Question, Student};
use askboard_store::SharedStore;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::notice::Notifier;

/// Outcome of one pass over the unclassified questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    pub classified: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct TeacherFlow {
    store: SharedStore,
    remote: RemoteClassifier,
    notifier: Notifier,
}

impl TeacherFlow {
    pub fn new(store: SharedStore, remote: RemoteClassifier, notifier: Notifier) -> Self {
        Self { store, remote, notifier }
    }

    /// Classify every unclassified question in the store, one request at a
    /// time. A failed item is counted and skipped; the pass always finishes
    /// and reports once. Results are applied by question id, so questions
    /// with identical content are each labelled, unlike [`Self::classify_single`].
    #[instrument(skip(self))]
    pub async fn classify_unclassified(&self) -> BatchReport {
        let pending = self.store.lock().await.unclassified_questions();
        let mut report = BatchReport { attempted: pending.len(), ..Default::default() };

        for question in &pending {
            let result = self.remote.classify_question(&question.content).await;
            match result.category {
                Some(category) => {
                    self.store.lock().await.update_question_category(&question.id, category);
                    report.classified += 1;
                }
                None => {
                    debug!(question_id = %question.id, "Left unclassified");
                    report.failed += 1;
                }
            }
        }

        info!(
            attempted = report.attempted,
            classified = report.classified,
            failed = report.failed,
            "Classification pass finished"
        );
        if report.attempted == 0 {
            self.notifier.info("No unclassified questions");
        } else if report.failed == 0 {
            self.notifier.success(format!("Classified {} questions", report.classified));
        } else {
            self.notifier.warning(format!(
                "Classified {} of {} questions; {} could not be classified",
                report.classified, report.attempted, report.failed
            ));
        }
        report
    }

    /// Classify text on behalf of a student when the question id is not at
    /// hand. The result is matched back by normalised content, so of two
    /// identical questions only the earlier one is labelled.
    pub async fn classify_single(&self, content: &str, student_id: &str) -> Classification {
        let result = self.remote.classify_question(content).await;
        if let Some(category) = result.category.as_deref() {
            let matched = self
                .store
                .lock()
                .await
                .update_question_category_by_content(content, student_id, category);
            if !matched {
                debug!(student_id, "Classified text has no local question");
            }
        }
        result
    }

    /// Override a question's category. The local copy changes only once the
    /// backend has accepted it.
    pub async fn classify_manually(&self, question_id: &str, category: &str) -> bool {
        if !self.remote.manual_classify_question(question_id, category).await {
            self.notifier.error("Manual classification failed");
            return false;
        }
        if !self.store.lock().await.update_question_category(question_id, category) {
            debug!(question_id, "Manually classified question is not stored locally");
        }
        self.notifier.success("Question classified");
        true
    }

    /// Send `questions` to the batch endpoint and keep whatever came back
    /// labelled. Unlabelled results are not written, so a backend failure
    /// never clears an existing category.
    pub async fn classify_batch(&self, questions: &[Question]) -> Vec<Question> {
        let results = self.remote.batch_classify_questions(questions).await;
        let labelled: Vec<Question> = results.iter().filter(|q| q.is_classified()).cloned().collect();
        if labelled.len() < results.len() {
            warn!(unlabelled = results.len() - labelled.len(), "Batch returned unclassified questions");
        }
        self.store.lock().await.update_questions_categories(labelled);
        results
    }

    pub async fn fetch_all_students(&self) -> Vec<Student> {
        self.remote.get_all_students().await
    }

    pub async fn fetch_all_questions(&self) -> Vec<Question> {
        self.remote.get_all_questions().await
    }

    pub async fn fetch_classified_questions(&self) -> Vec<Question> {
        self.remote.get_classified_questions().await
    }

    /// Adopt the backend's roster. An empty answer (including an unreachable
    /// backend) leaves the local roster untouched. Returns the roster size
    /// adopted, zero when nothing changed.
    pub async fn sync_roster(&self) -> usize {
        let students = self.remote.get_all_students().await;
        if students.is_empty() {
            self.notifier.warning("The backend returned no students; keeping the local roster");
            return 0;
        }
        let count = students.len();
        self.store.lock().await.replace_students(students);
        self.notifier.success(format!("Roster synchronised: {count} students"));
        count
    }
}
