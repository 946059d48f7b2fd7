//! Reconciliation of the payload shapes the backend is known to produce.
//!
//! The same resource may come back bare, wrapped under a named key, or
//! wrapped under `data`. Each shape is an extractor function; the extractors
//! are tried in order and the first acceptable candidate wins.

use super::errors::ApiError;
use crate::models::Account;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

type Extractor = fn(&Value) -> Option<&Value>;

/// Account shapes in priority order
const ACCOUNT_SHAPES: [(&str, Extractor); 6] = [
    ("user", wrapped_user),
    ("account", wrapped_account),
    ("data.user", nested_user),
    ("data.account", nested_account),
    ("data", wrapped_data),
    ("bare", bare_account),
];

/// Fields of which at least one must be set for a bare object to count as an account
const IDENTITY_FIELDS: [&str; 4] = ["fullName", "username", "email", "role"];

fn wrapped_user(body: &Value) -> Option<&Value> {
    body.get("user")
}

fn wrapped_account(body: &Value) -> Option<&Value> {
    body.get("account")
}

fn nested_user(body: &Value) -> Option<&Value> {
    body.get("data")?.get("user")
}

fn nested_account(body: &Value) -> Option<&Value> {
    body.get("data")?.get("account")
}

fn wrapped_data(body: &Value) -> Option<&Value> {
    body.get("data")
}

fn bare_account(body: &Value) -> Option<&Value> {
    IDENTITY_FIELDS
        .iter()
        .any(|field| body.get(*field).is_some_and(is_truthy))
        .then_some(body)
}

/// JSON truthiness: `null`, `false`, `0`, `""` are false, everything else true.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn has_truthy_id(candidate: &Value) -> bool {
    candidate.is_object() && candidate.get("id").is_some_and(is_truthy)
}

/// Resolve the account out of a current-account response body.
///
/// # Errors
///
/// * `ApiError::AccountNotFound` - No shape matched, or the matching candidate
///   is not a valid account
pub fn resolve_account(body: &Value) -> Result<Account, ApiError> {
    let (shape, candidate) = ACCOUNT_SHAPES
        .iter()
        .find_map(|(shape, extract)| {
            extract(body)
                .filter(|candidate| has_truthy_id(candidate))
                .map(|candidate| (*shape, candidate))
        })
        .ok_or_else(|| {
            warn!("Unexpected account payload: {body}");
            ApiError::AccountNotFound
        })?;

    debug!("Resolved account from '{shape}' shape");

    Account::deserialize(candidate).map_err(|error| {
        warn!("Account payload in '{shape}' shape could not be decoded: {error}");
        ApiError::AccountNotFound
    })
}

/// Decode a collection that may come as `{ <key>: [...] }`, `{ data: [...] }`
/// or a bare array. Any other body is an empty collection.
///
/// # Errors
///
/// * `ApiError::MalformedResponse` - An element could not be decoded
pub fn resolve_list<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = body
        .get(key)
        .filter(|value| is_truthy(value))
        .or_else(|| body.get("data").filter(|value| is_truthy(value)))
        .unwrap_or(body);

    match items {
        Value::Array(_) => Vec::<T>::deserialize(items)
            .map_err(|error| ApiError::MalformedResponse(format!("'{key}' list: {error}"))),
        _ => Ok(Vec::new()),
    }
}

/// Decode a single resource that may come wrapped under `key`, under `data`,
/// or bare.
///
/// # Errors
///
/// * `ApiError::MalformedResponse` - The resource could not be decoded
pub fn resolve_item<T: DeserializeOwned>(body: &Value, key: &str) -> Result<T, ApiError> {
    let item = body
        .get(key)
        .filter(|value| is_truthy(value))
        .or_else(|| body.get("data").filter(|value| is_truthy(value)))
        .unwrap_or(body);

    T::deserialize(item).map_err(|error| ApiError::MalformedResponse(format!("'{key}': {error}")))
}
