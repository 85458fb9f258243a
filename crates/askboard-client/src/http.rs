//! reqwest implementation of [`ClassificationApi`].
//!
//! Endpoints, relative to the configured base URL:
//!   POST /api/teachers/classify-content   {content}               → {category, confidence}
//!   POST /api/questions                   {content, student_id}   → created question
//!   POST /generate                        {topic?, studentId?}    → {content}
//!   POST /batch-classify                  {questions}             → [question]
//!   GET  /teacher/students                                        → [student]
//!   GET  /teacher/questions                                       → [question]
//!   GET  /teacher/classified-questions                            → [question]
//!   POST /teacher/manual-classify         {questionId, category}  → success

use std::time::Duration;

use askboard_common::{Classification, Question, Student};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::api::{ClassificationApi, ClientError};
use crate::wire::{
    BatchClassifyRequest, ClassifyRequest, CreateQuestionRequest, CreatedQuestion, GenerateRequest,
    GenerateResponse, ManualClassifyRequest, RemoteQuestion, RemoteStudent,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CLASSIFY_CONTENT_PATH:     &str = "/api/teachers/classify-content";
const CREATE_QUESTION_PATH:      &str = "/api/questions";
const GENERATE_PATH:             &str = "/generate";
const BATCH_CLASSIFY_PATH:       &str = "/batch-classify";
const STUDENTS_PATH:             &str = "/teacher/students";
const QUESTIONS_PATH:            &str = "/teacher/questions";
const CLASSIFIED_QUESTIONS_PATH: &str = "/teacher/classified-questions";
const MANUAL_CLASSIFY_PATH:      &str = "/teacher/manual-classify";

pub struct HttpClassificationClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl HttpClassificationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.into(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ── Helpers: status handling ──────────────────────────────────────────────────

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::ApiError { status: status.as_u16(), message: error_message(&body) });
    }
    Ok(serde_json::from_str(&body)?)
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::ApiError { status: status.as_u16(), message: error_message(&body) });
    }
    Ok(())
}

/// FastAPI puts the reason in `detail`; other servers use `message`.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v["detail"].as_str().or_else(|| v["message"].as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "unknown API error".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        })
}

#[async_trait]
impl ClassificationApi for HttpClassificationClient {
    #[instrument(skip(self, content))]
    async fn classify_content(&self, content: &str) -> Result<Classification, ClientError> {
        let resp = self.client
            .post(self.url(CLASSIFY_CONTENT_PATH))
            .json(&ClassifyRequest { content })
            .send()
            .await?;
        let classification: Classification = read_json(resp).await?;
        debug!(category = ?classification.category, confidence = classification.confidence, "Classification received");
        Ok(classification)
    }

    #[instrument(skip(self, content))]
    async fn create_question(&self, content: &str, student_id: &str) -> Result<CreatedQuestion, ClientError> {
        let resp = self.client
            .post(self.url(CREATE_QUESTION_PATH))
            .json(&CreateQuestionRequest { content, student_id })
            .send()
            .await?;
        read_json(resp).await
    }

    #[instrument(skip(self))]
    async fn generate_question(&self, topic: Option<&str>, student_id: Option<&str>) -> Result<String, ClientError> {
        let resp = self.client
            .post(self.url(GENERATE_PATH))
            .json(&GenerateRequest { topic, student_id })
            .send()
            .await?;
        let generated: GenerateResponse = read_json(resp).await?;
        Ok(generated.content)
    }

    #[instrument(skip(self, questions), fields(n = questions.len()))]
    async fn batch_classify(&self, questions: &[Question]) -> Result<Vec<Question>, ClientError> {
        let resp = self.client
            .post(self.url(BATCH_CLASSIFY_PATH))
            .json(&BatchClassifyRequest { questions })
            .send()
            .await?;
        let classified: Vec<RemoteQuestion> = read_json(resp).await?;
        Ok(classified.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        let resp = self.client.get(self.url(STUDENTS_PATH)).send().await?;
        let students: Vec<RemoteStudent> = read_json(resp).await?;
        Ok(students.into_iter().map(Student::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_questions(&self) -> Result<Vec<Question>, ClientError> {
        let resp = self.client.get(self.url(QUESTIONS_PATH)).send().await?;
        let questions: Vec<RemoteQuestion> = read_json(resp).await?;
        Ok(questions.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_classified_questions(&self) -> Result<Vec<Question>, ClientError> {
        let resp = self.client.get(self.url(CLASSIFIED_QUESTIONS_PATH)).send().await?;
        let questions: Vec<RemoteQuestion> = read_json(resp).await?;
        Ok(questions.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self))]
    async fn manual_classify(&self, question_id: &str, category: &str) -> Result<(), ClientError> {
        let resp = self.client
            .post(self.url(MANUAL_CLASSIFY_PATH))
            .json(&ManualClassifyRequest { question_id, category })
            .send()
            .await?;
        expect_success(resp).await
    }

    fn endpoint(&self) -> &str { &self.base_url }
}
