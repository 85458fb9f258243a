//! askboard-client — access to the remote classification backend.
//!
//! Two layers:
//!   [`ClassificationApi`]  raw, fallible operations (the seam; HTTP or scripted)
//!   [`RemoteClassifier`]   the facade the flows use; swallows transport
//!                          failures into safe fallback values, except for
//!                          question creation which the caller must see fail

pub mod api;
pub mod http;
pub mod remote;
pub mod wire;

pub use api::{ClassificationApi, ClientError};
pub use http::{HttpClassificationClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use remote::{RemoteClassifier, GENERATE_PLACEHOLDER};
pub use wire::CreatedQuestion;
