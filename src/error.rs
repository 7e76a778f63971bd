use thiserror::Error;

pub type SnapResult<T> = Result<T, SnapError>;

#[derive(Debug, Error)]
pub enum SnapError {
    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("invalid snap configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
