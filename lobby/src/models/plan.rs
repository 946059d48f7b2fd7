//! Subscription plan models.

use super::null_as_default;
use serde::{Deserialize, Serialize};

/// Subscription plan offered to business accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_popular: bool,
}

/// Started checkout session
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    /// Payment page the user has to visit
    pub url: String,
    pub message: Option<String>,
}
