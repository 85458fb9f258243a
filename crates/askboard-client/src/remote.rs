//! The graceful facade over a [`ClassificationApi`].
//!
//! Every operation except [`RemoteClassifier::create_question`] degrades to a
//! safe value when the backend cannot be reached. Callers must read the
//! unclassified fallback as "classification not available yet", never as a
//! result to retry automatically.

use std::sync::Arc;

use askboard_common::{Classification, Question, Student};
use tracing::warn;

use crate::api::{ClassificationApi, ClientError};
use crate::wire::CreatedQuestion;

/// Shown in place of a generated question when the backend fails.
pub const GENERATE_PLACEHOLDER: &str = "Unable to generate a question right now, please try again later";

#[derive(Clone)]
pub struct RemoteClassifier {
    api: Arc<dyn ClassificationApi>,
}

impl RemoteClassifier {
    pub fn new(api: Arc<dyn ClassificationApi>) -> Self {
        Self { api }
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    pub async fn classify_question(&self, content: &str) -> Classification {
        match self.api.classify_content(content).await {
            Ok(c) => c,
            Err(e) => {
                warn!(endpoint = self.endpoint(), error = %e, "Question classification failed");
                Classification::unclassified()
            }
        }
    }

    /// The one operation whose failure reaches the caller: it needs to know
    /// the submission did not land.
    pub async fn create_question(&self, content: &str, student_id: &str) -> Result<CreatedQuestion, ClientError> {
        self.api.create_question(content, student_id).await.map_err(|e| {
            warn!(endpoint = self.endpoint(), student_id, error = %e, "Question creation failed");
            e
        })
    }

    pub async fn generate_question(&self, topic: Option<&str>, student_id: Option<&str>) -> String {
        match self.api.generate_question(topic, student_id).await {
            Ok(content) => content,
            Err(e) => {
                warn!(endpoint = self.endpoint(), error = %e, "Question generation failed");
                GENERATE_PLACEHOLDER.to_string()
            }
        }
    }

    /// On failure the inputs come back with no category, never as if classified.
    pub async fn batch_classify_questions(&self, questions: &[Question]) -> Vec<Question> {
        match self.api.batch_classify(questions).await {
            Ok(classified) => classified,
            Err(e) => {
                warn!(endpoint = self.endpoint(), n = questions.len(), error = %e, "Batch classification failed");
                questions.iter().cloned().map(|q| q.with_category(None)).collect()
            }
        }
    }

    pub async fn get_all_students(&self) -> Vec<Student> {
        self.api.list_students().await.unwrap_or_else(|e| {
            warn!(endpoint = self.endpoint(), error = %e, "Listing students failed");
            Vec::new()
        })
    }

    pub async fn get_all_questions(&self) -> Vec<Question> {
        self.api.list_questions().await.unwrap_or_else(|e| {
            warn!(endpoint = self.endpoint(), error = %e, "Listing questions failed");
            Vec::new()
        })
    }

    pub async fn get_classified_questions(&self) -> Vec<Question> {
        self.api.list_classified_questions().await.unwrap_or_else(|e| {
            warn!(endpoint = self.endpoint(), error = %e, "Listing classified questions failed");
            Vec::new()
        })
    }

    pub async fn manual_classify_question(&self, question_id: &str, category: &str) -> bool {
        match self.api.manual_classify(question_id, category).await {
            Ok(()) => true,
            Err(e) => {
                warn!(endpoint = self.endpoint(), question_id, error = %e, "Manual classification failed");
                false
            }
        }
    }
}
