/// Plain records for the roster and the questions students submit.
/// Field names serialise in camelCase, matching the persisted snapshot.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::{deserialize_category, normalise_category, UNCLASSIFIED};

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Roster-internal identifier, display only.
    pub id: String,
    pub name: String,
    /// Enrollment number. Keys every per-student question list.
    pub student_id: String,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), student_id: student_id.into() }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub content: String,
    pub student_name: String,
    pub student_id: String,
    #[serde(default, deserialize_with = "deserialize_category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Question {
    /// A fresh, unclassified question authored by `student` right now.
    pub fn new(student: &Student, content: impl Into<String>) -> Self {
        Self {
            id: new_question_id(),
            content: content.into(),
            student_name: student.name.clone(),
            student_id: student.student_id.clone(),
            category: None,
            timestamp: snapshot_precision(Utc::now()),
        }
    }

    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }

    /// Category for display; the sentinel when unclassified.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCLASSIFIED)
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = normalise_category(category);
        self
    }
}

/// Truncate to milliseconds, the resolution the persisted snapshot keeps.
/// Every timestamp entering the store must pass through here or a save and
/// reload would not give back the same question.
pub fn snapshot_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// `q_` followed by a v4 uuid without hyphens.
pub fn new_question_id() -> String {
    format!("q_{}", Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// `None` when the service could not (or did not) classify.
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl Classification {
    pub fn new(category: impl Into<String>, confidence: f64) -> Self {
        Self { category: normalise_category(Some(category.into())), confidence }
    }

    /// The "classification not yet available" result.
    pub fn unclassified() -> Self {
        Self { category: None, confidence: 0.0 }
    }

    pub fn is_available(&self) -> bool {
        self.category.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student() -> Student {
        Student::new("s1", "Student 1", "20240001")
    }

    #[test]
    fn test_new_question_is_unclassified() {
        let q = Question::new(&student(), "What is force?");
        assert!(q.id.starts_with("q_"));
        assert_eq!(q.student_id, "20240001");
        assert_eq!(q.student_name, "Student 1");
        assert!(!q.is_classified());
        assert_eq!(q.category_label(), UNCLASSIFIED);
    }

    #[test]
    fn test_question_ids_are_unique() {
        let a = Question::new(&student(), "a");
        let b = Question::new(&student(), "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_snapshot_shape_is_camel_case_with_millis() {
        let q = Question::new(&student(), "x").with_category(Some("Mechanics".into()));
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["studentId"], "20240001");
        assert_eq!(json["studentName"], "Student 1");
        assert_eq!(json["category"], "Mechanics");
        assert_eq!(json["timestamp"].as_i64().unwrap(), q.timestamp.timestamp_millis());
    }

    #[test]
    fn test_sentinel_category_deserialises_as_none() {
        let json = serde_json::json!({
            "id": "q_1",
            "content": "x",
            "studentName": "Student 1",
            "studentId": "20240001",
            "category": "未分类",
            "timestamp": 1_700_000_000_000i64,
        });
        let q: Question = serde_json::from_value(json).unwrap();
        assert_eq!(q.category, None);
    }

    #[test]
    fn test_snapshot_precision_drops_sub_millisecond_digits() {
        let at = DateTime::parse_from_rfc3339("2024-09-01T08:30:00.341705882Z").unwrap().with_timezone(&Utc);
        let kept = snapshot_precision(at);
        assert_eq!(kept.to_rfc3339(), "2024-09-01T08:30:00.341+00:00");
        assert_eq!(snapshot_precision(kept), kept);
    }

    #[test]
    fn test_unclassified_classification_is_not_available() {
        assert!(!Classification::unclassified().is_available());
        assert!(!Classification::new("unclassified", 0.0).is_available());
        assert!(Classification::new("Mechanics", 0.9).is_available());
    }
}
