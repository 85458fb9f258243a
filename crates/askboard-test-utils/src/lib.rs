//! askboard-test-utils — fakes and fixtures shared by the workspace's test suites.

pub mod fixtures;
pub mod http;
pub mod scripted;

pub use fixtures::{roster, student};
pub use http::{serve_once, unreachable_base_url, CannedServer};
pub use scripted::{ApiCall, ScriptedApi};

// Re-exported so suites share one assertion flavour
pub use pretty_assertions;
