//! Transient user-facing notices.
//!
//! Notices are fanned out to whoever subscribed and then forgotten; nothing
//! about them is kept in the store. Every notice is also logged.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

const NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn emit(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Success | NoticeLevel::Info => info!(?level, %message, "Notice"),
            NoticeLevel::Warning => warn!(%message, "Notice"),
            NoticeLevel::Error => error!(%message, "Notice"),
        }
        // No subscribers is fine: the notice has been logged
        let _ = self.tx.send(Notice { level, message });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_notices_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("saved");
        notifier.error("failed");

        assert_eq!(rx.recv().await.unwrap(), Notice { level: NoticeLevel::Success, message: "saved".into() });
        assert_eq!(rx.recv().await.unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        Notifier::new().warning("nobody listening");
    }

    #[test]
    fn test_level_serialises_snake_case() {
        let json = serde_json::to_string(&NoticeLevel::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
