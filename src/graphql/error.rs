use async_graphql::{Error, ErrorExtensions};
use thiserror::Error as ThisError;
use tracing::error;

/// Failures a resolver reports back to the caller
#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    /// The wrapped error is logged, never shown to the caller
    #[error("internal error")]
    Store(anyhow::Error),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => "BAD_USER_INPUT",
            ApiError::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Log a store failure and turn it into a GraphQL error
pub(crate) fn store_error(err: anyhow::Error) -> Error {
    error!(error = ?err, "store operation failed");
    ApiError::Store(err).extend()
}
