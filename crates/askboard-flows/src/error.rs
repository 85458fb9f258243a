use askboard_client::ClientError;
use askboard_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    #[error("Question content is empty")]
    EmptyContent,
}
