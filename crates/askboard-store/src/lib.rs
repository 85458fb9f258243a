//! askboard-store — the question store.
//!
//! Single source of truth for the roster, the active student and every
//! student's questions, keyed by enrollment number. The store is an explicit
//! value handed to whoever needs it; persistence is an injected adapter the
//! store writes through after each mutation.
//!
//! # Example
//!
//! ```rust
//! use askboard_store::{MemoryPersistence, QuestionStore};
//!
//! let mut store = QuestionStore::open(MemoryPersistence::new()).unwrap();
//! let roster = store.generate_and_load_students(3, "2024");
//! store.set_current_student(roster[0].clone());
//! let q = store.add_question("What is force?").unwrap();
//! assert_eq!(store.student_questions("20240001"), &[q]);
//! ```

pub mod error;
pub mod normalise;
pub mod persistence;
pub mod roster;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use normalise::normalise_content;
pub use persistence::{JsonFilePersistence, MemoryPersistence, Persistence};
pub use roster::{generate_students, DEFAULT_ENROLLMENT_PREFIX, DEFAULT_ROSTER_SIZE};
pub use snapshot::{StoreSnapshot, SNAPSHOT_NAME, SNAPSHOT_VERSION};
pub use store::{QuestionStore, SharedStore};
