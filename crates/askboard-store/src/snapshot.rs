//! The persisted shape of the store.

use std::collections::BTreeMap;

use askboard_common::{Question, Student};
use serde::{Deserialize, Serialize};

/// Name written into every snapshot envelope.
pub const SNAPSHOT_NAME: &str = "student-storage";
pub const SNAPSHOT_VERSION: u32 = 0;

/// Everything the store holds. Keys of `questions` are enrollment numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub current_student: Option<Student>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub questions: BTreeMap<String, Vec<Question>>,
}

impl StoreSnapshot {
    pub fn question_count(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }
}

/// On-disk wrapper: `{ "name": ..., "version": ..., "state": {...} }`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SnapshotEnvelope {
    pub name: String,
    pub version: u32,
    pub state: StoreSnapshot,
}

impl SnapshotEnvelope {
    pub fn wrap(state: &StoreSnapshot) -> Self {
        Self { name: SNAPSHOT_NAME.to_string(), version: SNAPSHOT_VERSION, state: state.clone() }
    }
}
