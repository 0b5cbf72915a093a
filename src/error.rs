use thiserror::Error;

pub type SparklineResult<T> = Result<T, SparklineError>;

#[derive(Debug, Error)]
pub enum SparklineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid path at byte {offset}: {reason}")]
    InvalidPath { offset: usize, reason: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
