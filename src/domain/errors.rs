use thiserror::Error;

/// Failure raised by an outbound call to the hosted database or a rate mirror.
///
/// Infrastructure clients attach this to the `anyhow::Error` they return so the
/// application layer can decide whether to relay the upstream status or map it
/// to a gateway error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream unreachable: {0}")]
    Transport(String),
}
