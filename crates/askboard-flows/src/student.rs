//! Student-facing submission flow.
//!
//! A submission walks `Composing -> OptimisticallyAdded -> ClassificationPending`
//! and ends `Classified` or `ClassificationFailed`. The question is in the
//! store from the second step on and stays there whatever the classifier says.

use askboard_client::{CreatedQuestion, RemoteClassifier};
use askboard_common::{Classification, Question};
use askboard_store::{SharedStore, StoreError};
use tracing::{debug, info, instrument};

use crate::error::{FlowError, Result};
use crate::notice::Notifier;

/// Returned by [`StudentFlow::request_generated_question`] when nobody is selected.
pub const NO_STUDENT_PLACEHOLDER: &str = "Select a student first";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Composing,
    OptimisticallyAdded,
    ClassificationPending,
    Classified(Classification),
    ClassificationFailed,
}

impl SubmissionState {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Classified(_) | Self::ClassificationFailed)
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    /// The question as it stands in the store once the flow finished.
    pub question: Question,
    pub state: SubmissionState,
}

#[derive(Clone)]
pub struct StudentFlow {
    store: SharedStore,
    remote: RemoteClassifier,
    notifier: Notifier,
}

impl StudentFlow {
    pub fn new(store: SharedStore, remote: RemoteClassifier, notifier: Notifier) -> Self {
        Self { store, remote, notifier }
    }

    /// Add the question for the current student, then classify it.
    ///
    /// Errors only when nothing could be added: blank content or no current
    /// student. A classification failure is reported as a notice and as
    /// [`SubmissionState::ClassificationFailed`]; the question stays in the
    /// store unclassified for a later teacher pass.
    #[instrument(skip(self, content))]
    pub async fn submit_question(&self, content: &str) -> Result<Submission> {
        let mut state = SubmissionState::Composing;
        if content.trim().is_empty() {
            return Err(FlowError::EmptyContent);
        }

        let added = self.store.lock().await.add_question(content);
        let mut question = match added {
            Ok(q) => q,
            Err(e) => {
                self.notifier.error(format!("Could not submit the question: {e}"));
                return Err(e.into());
            }
        };
        advance(&mut state, SubmissionState::OptimisticallyAdded, &question);

        advance(&mut state, SubmissionState::ClassificationPending, &question);
        let result = self.remote.classify_question(content).await;

        match result.category.clone() {
            Some(category) => {
                self.store.lock().await.update_question_category(&question.id, category.as_str());
                question.category = Some(category);
                self.notifier.success("Question submitted");
                advance(&mut state, SubmissionState::Classified(result), &question);
            }
            None => {
                self.notifier.error("Question saved, but it could not be classified right now");
                advance(&mut state, SubmissionState::ClassificationFailed, &question);
            }
        }

        Ok(Submission { question, state })
    }

    /// Ask the backend for a practice question for the current student.
    pub async fn request_generated_question(&self, topic: Option<&str>) -> String {
        let student_id = match self.store.lock().await.current_student() {
            Some(s) => s.student_id.clone(),
            None => return NO_STUDENT_PLACEHOLDER.to_string(),
        };
        self.remote.generate_question(topic, Some(&student_id)).await
    }

    /// The current student's questions, or `None` when nobody is selected.
    pub async fn load_student_questions(&self) -> Option<Vec<Question>> {
        let store = self.store.lock().await;
        let student = store.current_student()?;
        Some(store.student_questions(&student.student_id).to_vec())
    }

    /// Record the question on the backend for the current student. Unlike
    /// classification, a failure here reaches the caller.
    pub async fn publish_question(&self, content: &str) -> Result<CreatedQuestion> {
        if content.trim().is_empty() {
            return Err(FlowError::EmptyContent);
        }
        let student_id = self
            .store
            .lock()
            .await
            .current_student()
            .map(|s| s.student_id.clone())
            .ok_or(StoreError::NoCurrentStudent)?;

        match self.remote.create_question(content, &student_id).await {
            Ok(created) => {
                info!(remote_id = %created.id, student_id = %student_id, "Question published");
                self.notifier.success("Question published");
                Ok(created)
            }
            Err(e) => {
                self.notifier.error(format!("Publishing failed: {e}"));
                Err(e.into())
            }
        }
    }
}

fn advance(state: &mut SubmissionState, next: SubmissionState, question: &Question) {
    debug!(question_id = %question.id, from = ?state, to = ?next, "Submission state");
    *state = next;
}
