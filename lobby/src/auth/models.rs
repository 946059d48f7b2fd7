//! Authentication data models.

use crate::models::{Account, Role, condominium::digits_only};
use serde::{Deserialize, Serialize};

/// Sign-in request (login is a username or e-mail)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub login: String,
    pub password: String,
}

/// Account registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub cpf: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
    pub condominium_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_number: Option<String>,
}

impl SignUpRequest {
    /// Copy ready to send: CPF and phone reduced to digits, and unit fields
    /// dropped for roles that do not live in a unit.
    pub fn normalized(&self) -> Self {
        let keeps_unit = self.role.has_unit();
        Self {
            cpf: digits_only(&self.cpf),
            phone: digits_only(&self.phone),
            block: self.block.clone().filter(|_| keeps_unit),
            apartment_number: self.apartment_number.clone().filter(|_| keeps_unit),
            ..self.clone()
        }
    }
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Password reset confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, persisted token not checked yet
    Initializing,
    /// Nobody signed in
    Anonymous,
    /// Token being verified against the backend
    Authenticating,
    /// Token verified, account loaded
    Authenticated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Initializing => write!(f, "initializing"),
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticating => write!(f, "authenticating"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// In-memory session.
///
/// Account and token are either both present or both absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: SessionState,
    user: Option<Account>,
    token: Option<String>,
}

impl Session {
    pub(crate) fn initializing() -> Self {
        Self {
            state: SessionState::Initializing,
            user: None,
            token: None,
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
            user: None,
            token: None,
        }
    }

    pub(crate) fn authenticated(user: Account, token: String) -> Self {
        Self {
            state: SessionState::Authenticated,
            user: Some(user),
            token: Some(token),
        }
    }

    /// Enter `Authenticating`, keeping whatever identity is already held.
    pub(crate) fn begin_authentication(&mut self) {
        self.state = SessionState::Authenticating;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&Account> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True during the boot check and while a login is in flight
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Initializing | SessionState::Authenticating
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
