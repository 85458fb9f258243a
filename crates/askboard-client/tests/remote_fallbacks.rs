//! Fallback values RemoteClassifier hands back when the backend is unreachable.

use std::sync::Arc;
use std::time::Duration;

use askboard_client::{HttpClassificationClient, RemoteClassifier, GENERATE_PLACEHOLDER};
use askboard_common::Question;
use askboard_test_utils::pretty_assertions::assert_eq;
use askboard_test_utils::{student, unreachable_base_url, ScriptedApi};

async fn unreachable() -> RemoteClassifier {
    let base = unreachable_base_url().await;
    let http = HttpClassificationClient::new(base, Duration::from_secs(2)).unwrap();
    RemoteClassifier::new(Arc::new(http))
}

#[tokio::test]
async fn test_classify_falls_back_to_unclassified() {
    let remote = unreachable().await;
    let result = remote.classify_question("What is force?").await;
    assert!(!result.is_available());
    assert_eq!(result.confidence, 0.0);
}

#[tokio::test]
async fn test_create_question_propagates_failure() {
    let remote = unreachable().await;
    assert!(remote.create_question("What is force?", "20240001").await.is_err());
}

#[tokio::test]
async fn test_generate_returns_placeholder() {
    let remote = unreachable().await;
    assert_eq!(remote.generate_question(Some("optics"), Some("20240001")).await, GENERATE_PLACEHOLDER);
}

#[tokio::test]
async fn test_listings_degrade_to_empty() {
    let remote = unreachable().await;
    assert!(remote.get_all_students().await.is_empty());
    assert!(remote.get_all_questions().await.is_empty());
    assert!(remote.get_classified_questions().await.is_empty());
}

#[tokio::test]
async fn test_manual_classify_reports_false() {
    let remote = unreachable().await;
    assert!(!remote.manual_classify_question("q_1", "Definition").await);
}

#[tokio::test]
async fn test_batch_fallback_never_marks_questions_classified() {
    let remote = RemoteClassifier::new(Arc::new(ScriptedApi::new().offline()));
    let already = Question::new(&student(1), "a").with_category(Some("Definition".into()));
    let fresh = Question::new(&student(2), "b");

    let out = remote.batch_classify_questions(&[already.clone(), fresh.clone()]).await;
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|q| !q.is_classified()));
    assert_eq!(out[0].id, already.id);
    assert_eq!(out[1].id, fresh.id);
}

#[tokio::test]
async fn test_successful_paths_pass_through() {
    let api = ScriptedApi::new()
        .classify("What is force?", "Mechanics", 0.9)
        .generates("What is momentum?")
        .with_students(vec![student(1)]);
    let remote = RemoteClassifier::new(Arc::new(api));

    assert_eq!(remote.classify_question("What is force?").await.category.as_deref(), Some("Mechanics"));
    assert_eq!(remote.generate_question(None, None).await, "What is momentum?");
    assert_eq!(remote.get_all_students().await, vec![student(1)]);
    assert!(remote.manual_classify_question("q_1", "Definition").await);
}
