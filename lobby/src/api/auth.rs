//! Authentication endpoints.

use super::{
    client::{ApiClient, NO_BODY, text_field},
    errors::ApiError,
    messages,
    response::ApiResult,
    shapes::resolve_account,
};
use crate::auth::models::{PasswordResetConfirm, PasswordResetRequest, SignInRequest, SignUpRequest};
use crate::models::Account;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// Exchange credentials for a bearer token.
    pub async fn sign_in(&self, request: &SignInRequest) -> ApiResult<String> {
        self.call(
            Method::POST,
            "/auth/sign-in",
            Some(request),
            None,
            messages::REQUEST_REJECTED,
            |body| {
                text_field(&body, "token").ok_or_else(|| {
                    ApiError::MalformedResponse("sign-in response has no token".to_string())
                })
            },
        )
        .await
    }

    /// Create an account. The request is normalized before sending.
    pub async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<Value> {
        if !request.role.is_known() {
            return ApiError::InvalidRequest(messages::UNKNOWN_ROLE.to_string()).into();
        }
        self.call(
            Method::POST,
            "/auth/sign-up",
            Some(&request.normalized()),
            None,
            messages::REQUEST_REJECTED,
            Ok,
        )
        .await
    }

    /// Ask the backend to invalidate `token`.
    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        self.call(
            Method::POST,
            "/auth/logout",
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }

    /// Fetch the account that owns `token`.
    ///
    /// The backend wraps the account in several ways; see
    /// [`resolve_account`] for the accepted shapes.
    pub async fn fetch_current_account(&self, token: &str) -> ApiResult<Account> {
        self.call(
            Method::GET,
            "/auth/me",
            NO_BODY,
            Some(token),
            messages::ACCOUNT_UNAVAILABLE,
            |body| resolve_account(&body),
        )
        .await
    }

    /// Request a password reset e-mail.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        let request = PasswordResetRequest {
            email: email.trim().to_string(),
        };

        self.call(
            Method::POST,
            "/auth/forgot-password",
            Some(&request),
            None,
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }

    /// Set a new password using the token from the reset e-mail.
    pub async fn reset_password(&self, reset_token: &str, new_password: &str) -> ApiResult<()> {
        let request = PasswordResetConfirm {
            token: reset_token.to_string(),
            new_password: new_password.to_string(),
        };

        self.call(
            Method::POST,
            "/auth/reset-password",
            Some(&request),
            None,
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }
}
