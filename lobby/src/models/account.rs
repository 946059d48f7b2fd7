//! Account models.

use super::{lenient_id, null_as_default, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account ID type
pub type AccountId = i64;

/// Account role.
///
/// Parsing is case-insensitive and `ADMIN` is an alias of `BUSINESS`.
/// Anything else becomes [`Role::Unknown`], which is display-only: the API
/// client refuses to send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Resident,
    Doorman,
    Syndic,
    Business,
    #[default]
    Unknown,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => "RESIDENT",
            Role::Doorman => "DOORMAN",
            Role::Syndic => "SYNDIC",
            Role::Business => "BUSINESS",
            Role::Unknown => "UNKNOWN",
        }
    }

    /// Whether the role is one the backend assigns
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }

    /// Whether accounts with this role live in a condominium unit
    /// (and therefore carry block and apartment number).
    pub fn has_unit(&self) -> bool {
        matches!(self, Role::Resident | Role::Syndic)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "RESIDENT" => Role::Resident,
            "DOORMAN" => Role::Doorman,
            "SYNDIC" => Role::Syndic,
            "BUSINESS" | "ADMIN" => Role::Business,
            _ => Role::Unknown,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::from(raw.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account as returned by the backend.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "lenient_id")]
    pub id: AccountId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// Name to show in greetings, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    pub fn has_subscription(&self) -> bool {
        self.subscription_plan.is_some()
    }

    /// Parsed ban expiry, if the backend sent a readable one
    pub fn ban_expiry(&self) -> Option<DateTime<Utc>> {
        self.ban_expires_at.as_deref().and_then(parse_timestamp)
    }

    /// Whether the account is banned at `now`.
    ///
    /// A ban without a readable expiry counts as permanent.
    pub fn is_banned_at(&self, now: DateTime<Utc>) -> bool {
        match self.ban_expiry() {
            Some(expiry) => expiry > now,
            None => self.banned_at.is_some(),
        }
    }
}

/// Unit of a ban duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BanUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl std::str::FromStr for BanUnit {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(BanUnit::Hours),
            "days" | "day" | "d" => Ok(BanUnit::Days),
            "weeks" | "week" | "w" => Ok(BanUnit::Weeks),
            "months" | "month" | "m" => Ok(BanUnit::Months),
            "years" | "year" | "y" => Ok(BanUnit::Years),
            other => Err(format!("unknown ban unit '{other}'")),
        }
    }
}

/// Ban request body
#[derive(Debug, Clone, Serialize)]
pub struct BanRequest {
    pub id: AccountId,
    pub duration: u32,
    pub unit: BanUnit,
}

/// Role change request body
#[derive(Debug, Clone, Serialize)]
pub struct RoleChange {
    pub id: AccountId,
    pub role: Role,
}
