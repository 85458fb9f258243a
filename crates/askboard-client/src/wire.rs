//! Request and response bodies for the classification backend.
//!
//! The backend is not consistent about its shapes: the teacher listing
//! endpoints answer in snake_case with integer ids and a `created_at` column,
//! while the batch endpoint echoes the camelCase records it was sent. The
//! `Remote*` types accept both and convert into the shared records.

use askboard_common::category::deserialize_category;
use askboard_common::{snapshot_precision, Question, Student};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionRequest<'a> {
    pub content: &'a str,
    pub student_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<&'a str>,
    #[serde(rename = "studentId", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct BatchClassifyRequest<'a> {
    pub questions: &'a [Question],
}

#[derive(Debug, Serialize)]
pub struct ManualClassifyRequest<'a> {
    #[serde(rename = "questionId")]
    pub question_id: &'a str,
    pub category: &'a str,
}

// ── Responses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
}

/// The record the backend keeps for a created question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedQuestion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,
    #[serde(alias = "studentId", deserialize_with = "string_or_number")]
    pub student_id: String,
    #[serde(default, alias = "studentName", deserialize_with = "nullable_string")]
    pub student_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoteStudent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(alias = "studentId", deserialize_with = "string_or_number")]
    pub student_id: String,
}

impl From<RemoteStudent> for Student {
    fn from(s: RemoteStudent) -> Self {
        Student { id: s.id, name: s.name, student_id: s.student_id }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoteQuestion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default, alias = "studentName", deserialize_with = "nullable_string")]
    pub student_name: String,
    #[serde(alias = "studentId", deserialize_with = "string_or_number")]
    pub student_id: String,
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,
    #[serde(default, alias = "created_at")]
    pub timestamp: Option<RemoteTimestamp>,
}

impl From<RemoteQuestion> for Question {
    fn from(q: RemoteQuestion) -> Self {
        Question {
            id: q.id,
            content: q.content,
            student_name: q.student_name,
            student_id: q.student_id,
            category: q.category,
            timestamp: snapshot_precision(q.timestamp.and_then(|t| t.to_utc()).unwrap_or_else(Utc::now)),
        }
    }
}

/// Epoch milliseconds from the frontend shape, a datetime string from the database shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RemoteTimestamp {
    Millis(i64),
    Text(String),
}

impl RemoteTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RemoteTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            RemoteTimestamp::Text(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    // SQL timestamps without an offset are UTC
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                        .ok()
                        .map(|naive| naive.and_utc())
                }),
        }
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snake_case_question_with_integer_ids() {
        let json = serde_json::json!({
            "id": 7,
            "content": "What is inertia?",
            "category": null,
            "student_id": "20240003",
            "student_name": "Student 3",
        });
        let q: Question = serde_json::from_value::<RemoteQuestion>(json).unwrap().into();
        assert_eq!(q.id, "7");
        assert_eq!(q.student_id, "20240003");
        assert_eq!(q.student_name, "Student 3");
        assert_eq!(q.category, None);
    }

    #[test]
    fn test_camel_case_question_keeps_timestamp() {
        let json = serde_json::json!({
            "id": "q_abc",
            "content": "Explain torque",
            "studentName": "Student 1",
            "studentId": "20240001",
            "category": "Application",
            "timestamp": 1_700_000_000_123i64,
        });
        let q: Question = serde_json::from_value::<RemoteQuestion>(json).unwrap().into();
        assert_eq!(q.category.as_deref(), Some("Application"));
        assert_eq!(q.timestamp.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_created_at_string_is_parsed() {
        let json = serde_json::json!({
            "id": 1,
            "content": "x",
            "student_id": 2,
            "created_at": "2024-09-01T08:30:00",
        });
        let q: Question = serde_json::from_value::<RemoteQuestion>(json).unwrap().into();
        assert_eq!(q.student_id, "2");
        assert_eq!(q.timestamp.to_rfc3339(), "2024-09-01T08:30:00+00:00");
    }

    #[test]
    fn test_decoded_timestamps_are_millisecond_precision() {
        let fine = serde_json::json!({
            "id": 3,
            "content": "x",
            "student_id": "20240001",
            "created_at": "2024-09-01T08:30:00.341705882",
        });
        let q: Question = serde_json::from_value::<RemoteQuestion>(fine).unwrap().into();
        assert_eq!(q.timestamp.timestamp_subsec_nanos(), 341_000_000);

        let missing = serde_json::json!({ "id": 4, "content": "y", "student_id": "20240001" });
        let q: Question = serde_json::from_value::<RemoteQuestion>(missing).unwrap().into();
        assert_eq!(q.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_created_question_sentinel_category_is_none() {
        let json = serde_json::json!({
            "id": "9f1c",
            "content": "What is force?",
            "category": "未分类",
            "student_id": "20240001",
            "student_name": "test",
        });
        let created: CreatedQuestion = serde_json::from_value(json).unwrap();
        assert_eq!(created.category, None);
        assert_eq!(created.student_name, "test");
    }

    #[test]
    fn test_generate_request_omits_absent_fields() {
        let body = serde_json::to_value(GenerateRequest { topic: None, student_id: Some("20240001") }).unwrap();
        assert_eq!(body, serde_json::json!({ "studentId": "20240001" }));
    }

    #[test]
    fn test_manual_classify_request_shape() {
        let body = serde_json::to_value(ManualClassifyRequest { question_id: "q_1", category: "Definition" }).unwrap();
        assert_eq!(body, serde_json::json!({ "questionId": "q_1", "category": "Definition" }));
    }
}
