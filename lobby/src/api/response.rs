//! Normalized API result.

use super::{errors::ApiError, messages};
use thiserror::Error;

/// Canonical outcome of every backend call.
///
/// A failed result never carries a payload and always carries a non-empty
/// message suitable for display. The constructors are the only way to build
/// one, so both hold for every value.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    success: bool,
    message: Option<String>,
    payload: Option<T>,
    status: Option<u16>,
}

/// Failed [`ApiResult`] as an error value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiFailure {
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl<T> ApiResult<T> {
    /// Successful result carrying `payload`
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload: Some(payload),
            status: None,
        }
    }

    /// Failed result for `error`
    pub fn failure(error: &ApiError) -> Self {
        Self {
            success: false,
            message: Some(error.client_message()),
            payload: None,
            status: error.status(),
        }
    }

    /// Attach an informational message. Blank messages are ignored, and a
    /// failure keeps its own message.
    pub fn with_message(mut self, message: Option<String>) -> Self {
        if self.success {
            self.message = message.filter(|m| !m.trim().is_empty());
        }
        self
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the backend answered 401, meaning the token is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            success: self.success,
            message: self.message,
            payload: self.payload.map(f),
            status: self.status,
        }
    }

    pub fn into_result(self) -> Result<T, ApiFailure> {
        match (self.success, self.payload) {
            (true, Some(payload)) => Ok(payload),
            _ => Err(ApiFailure {
                message: self
                    .message
                    .unwrap_or_else(|| messages::GENERIC_ERROR.to_string()),
                status: self.status,
            }),
        }
    }
}

impl<T> From<ApiFailure> for ApiResult<T> {
    fn from(failure: ApiFailure) -> Self {
        let message = if failure.message.trim().is_empty() {
            messages::GENERIC_ERROR.to_string()
        } else {
            failure.message
        };

        Self {
            success: false,
            message: Some(message),
            payload: None,
            status: failure.status,
        }
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(error: ApiError) -> Self {
        ApiResult::failure(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_message_and_no_payload() {
        let result: ApiResult<u32> = ApiResult::failure(&ApiError::AccountNotFound);

        assert!(!result.is_success());
        assert!(result.payload().is_none());
        assert_eq!(result.message(), Some(messages::ACCOUNT_NOT_FOUND));
    }

    #[test]
    fn test_failure_ignores_extra_message() {
        let result: ApiResult<u32> = ApiResult::failure(&ApiError::AccountNotFound)
            .with_message(Some("all good".to_string()));
        assert_eq!(result.message(), Some(messages::ACCOUNT_NOT_FOUND));
    }

    #[test]
    fn test_success_message_filters_blank() {
        let result = ApiResult::success(1).with_message(Some(" ".to_string()));
        assert_eq!(result.message(), None);

        let result = ApiResult::success(1).with_message(Some("Saved".to_string()));
        assert_eq!(result.message(), Some("Saved"));
    }

    #[test]
    fn test_into_result_round_trip() {
        let failed: ApiResult<u32> = ApiError::Status {
            status: 401,
            message: "Invalid credentials.".to_string(),
        }
        .into();
        assert!(failed.is_unauthorized());

        let failure = failed.into_result().unwrap_err();
        assert!(failure.is_unauthorized());
        assert_eq!(failure.to_string(), "Invalid credentials.");

        let retyped: ApiResult<String> = failure.into();
        assert!(!retyped.is_success());
        assert_eq!(retyped.status(), Some(401));
    }

    #[test]
    fn test_map_keeps_outcome() {
        let result = ApiResult::success(2).with_status(200).map(|n| n * 10);
        assert_eq!(result.payload(), Some(&20));
        assert_eq!(result.status(), Some(200));
    }
}
