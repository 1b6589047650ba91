//! Errors raised by a vehicle API session.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("remote API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    #[error("vehicle does not support this feature: {0}")]
    Unsupported(String),

    #[error("session already closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, ClientError>;
