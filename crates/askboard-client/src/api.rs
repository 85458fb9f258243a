//! Classification backend trait and its error type.

use askboard_common::{Classification, Question, Student};
use async_trait::async_trait;
use thiserror::Error;

use crate::wire::CreatedQuestion;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// One method per backend operation. Implementations report every failure;
/// deciding what a failure means to the user is [`crate::RemoteClassifier`]'s job.
#[async_trait]
pub trait ClassificationApi: Send + Sync {
    async fn classify_content(&self, content: &str) -> Result<Classification, ClientError>;
    async fn create_question(&self, content: &str, student_id: &str) -> Result<CreatedQuestion, ClientError>;
    async fn generate_question(&self, topic: Option<&str>, student_id: Option<&str>) -> Result<String, ClientError>;
    async fn batch_classify(&self, questions: &[Question]) -> Result<Vec<Question>, ClientError>;
    async fn list_students(&self) -> Result<Vec<Student>, ClientError>;
    async fn list_questions(&self) -> Result<Vec<Question>, ClientError>;
    async fn list_classified_questions(&self) -> Result<Vec<Question>, ClientError>;
    async fn manual_classify(&self, question_id: &str, category: &str) -> Result<(), ClientError>;
    /// Where requests go, for log lines.
    fn endpoint(&self) -> &str;
}
