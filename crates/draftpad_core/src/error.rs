//! Application error types for registry and domain logic.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Internal server error")]
    Internal,
}
