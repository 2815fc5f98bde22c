use thiserror::Error;

/// Rejections raised before allocation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error("invalid schedule configuration: {0}")]
    InvalidConfig(String),
}

pub type SchemeResult<T> = Result<T, SchemeError>;
