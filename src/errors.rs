use thiserror::Error;

/// Failures crossing the remote API boundary.
///
/// `Unauthorized` is kept separate from the other HTTP failures because it has
/// a different recovery path: the session is torn down and the operation is
/// never retried with the same credential.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    Decode(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Failures on the order write path. Validation errors are raised before any
/// network call is made.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("price must be positive")]
    InvalidPrice,

    #[error(transparent)]
    Api(#[from] ApiError),
}
