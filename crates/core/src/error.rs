use crate::types::Timestamp;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Poll closed at {closes_at}")]
    PollClosed { closes_at: Timestamp },

    #[error("Configuration error: {0}")]
    Config(String),
}
