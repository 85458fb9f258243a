//! askboard-flows — what a student and a teacher can do.
//!
//! Both flows are built from an injected [`askboard_store::SharedStore`], a
//! [`askboard_client::RemoteClassifier`] and a [`Notifier`]. Network calls are
//! awaited with the store unlocked, so other submissions and results can land
//! in between; each result is applied in the order it resolves.

pub mod error;
pub mod notice;
pub mod student;
pub mod teacher;

pub use error::{FlowError, Result};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use student::{StudentFlow, Submission, SubmissionState, NO_STUDENT_PLACEHOLDER};
pub use teacher::{BatchReport, TeacherFlow};
