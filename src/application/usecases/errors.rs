use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::errors::UpstreamError;

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Non-2xx answer from the database, relayed with its own status.
    #[error("Supabase error: {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    NotConfigured(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Validation(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            UseCaseError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            UseCaseError::NotConfigured(_) | UseCaseError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Like `From<anyhow::Error>`, but a database status error keeps its
    /// status and body so the caller sees what the database said.
    pub fn relay_upstream(err: anyhow::Error) -> Self {
        match err.downcast_ref::<UpstreamError>() {
            Some(UpstreamError::Status { status, body }) => UseCaseError::Upstream {
                status: *status,
                body: body.clone(),
            },
            _ => UseCaseError::from(err),
        }
    }
}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<UpstreamError>() {
            Some(UpstreamError::Transport(message)) => UseCaseError::BadGateway(message.clone()),
            _ => UseCaseError::Internal(err),
        }
    }
}
