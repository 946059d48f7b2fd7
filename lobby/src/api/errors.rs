//! API error types.

use super::messages;
use thiserror::Error;

/// Failures of a backend call, before they are normalized into an
/// [`ApiResult`](super::ApiResult).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, DNS failure, timeout or an interrupted body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` is already resolved for display
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body carries `success: false`
    #[error("Request rejected: {message}")]
    Rejected { status: u16, message: String },

    /// Current-account response without a recognizable account
    #[error("Account not found in response")]
    AccountNotFound,

    /// Response body did not have the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request refused before sending; the message is shown as is
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message safe to show to the user.
    ///
    /// Never empty. Transport and decoding details stay in the logs.
    pub fn client_message(&self) -> String {
        let message = match self {
            ApiError::Transport(_) => messages::CONNECTION_ERROR,
            ApiError::Status { message, .. }
            | ApiError::Rejected { message, .. }
            | ApiError::InvalidRequest(message) => message.as_str(),
            ApiError::AccountNotFound => messages::ACCOUNT_NOT_FOUND,
            ApiError::MalformedResponse(_) => messages::INVALID_RESPONSE,
        };

        if message.trim().is_empty() {
            messages::GENERIC_ERROR.to_string()
        } else {
            message.to_string()
        }
    }

    /// HTTP status the failure came with, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(error) => error.status().map(|status| status.as_u16()),
            ApiError::AccountNotFound
            | ApiError::MalformedResponse(_)
            | ApiError::InvalidRequest(_) => None,
        }
    }
}
