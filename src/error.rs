//! Error type for construction-time validation and file I/O
//!
//! Nothing inside the per-frame simulation returns an error. Failures are
//! contract violations caught when a collider, level, or session is built,
//! or problems reading tuning and leaderboard files.

/// Errors raised by this crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("malformed leaderboard line {line}: {reason}")]
    MalformedLeaderboard { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for building an `InvalidConfiguration` error
pub(crate) fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfiguration(msg.into())
}
