//! Delivery (parcel) models.

use super::{lenient_id, null_as_default, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which backend view of deliveries to use.
///
/// Residents see their own parcels, doormen the ones they handle and
/// syndics (and business admins) the whole condominium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryScope {
    Own,
    Doorman,
    Syndic,
}

impl DeliveryScope {
    /// Collection path for the scope
    pub fn collection(&self) -> &'static str {
        match self {
            DeliveryScope::Own => "/deliveries",
            DeliveryScope::Doorman => "/doorman/deliveries",
            DeliveryScope::Syndic => "/syndic/deliveries",
        }
    }
}

/// Doorman who registered a delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoormanRef {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Delivery model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracking_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apartment_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doorman: Option<DoormanRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Delivery {
    /// A delivery is withdrawn once the backend has stamped a withdrawal date.
    pub fn is_withdrawn(&self) -> bool {
        self.withdrawal_date
            .as_deref()
            .is_some_and(|date| !date.trim().is_empty())
    }

    pub fn arrived_at(&self) -> Option<DateTime<Utc>> {
        self.arrival_date.as_deref().and_then(parse_timestamp)
    }

    pub fn withdrawn_at(&self) -> Option<DateTime<Utc>> {
        self.withdrawal_date.as_deref().and_then(parse_timestamp)
    }

    /// Unit label such as `B-101`, or just the apartment when there is no block
    pub fn unit(&self) -> String {
        match self.block.as_deref().map(str::trim) {
            Some(block) if !block.is_empty() => format!("{}-{}", block, self.apartment_number),
            _ => self.apartment_number.clone(),
        }
    }
}

/// Delivery registration body (doorman)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDelivery {
    pub recipient_name: String,
    pub block: String,
    pub apartment_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delivery_from_backend_payload() {
        let delivery: Delivery = serde_json::from_value(json!({
            "id": 3,
            "trackingCode": "BR123",
            "recipientName": "Ana",
            "block": "B",
            "apartmentNumber": "101",
            "status": "PENDING",
            "arrivalDate": "2025-02-01T09:30:00",
            "withdrawalDate": null,
            "doorman": { "id": 9, "name": "Carlos" },
            "carrier": "Correios"
        }))
        .unwrap();

        assert_eq!(delivery.tracking_code, "BR123");
        assert_eq!(delivery.unit(), "B-101");
        assert!(!delivery.is_withdrawn());
        assert!(delivery.arrived_at().is_some());
        assert_eq!(delivery.doorman.as_ref().map(|d| d.name.as_str()), Some("Carlos"));
        assert_eq!(delivery.extra.get("carrier"), Some(&json!("Correios")));
    }

    #[test]
    fn test_withdrawn_delivery() {
        let delivery: Delivery = serde_json::from_value(json!({
            "id": 4,
            "apartmentNumber": "12",
            "withdrawalDate": "2025-02-02T10:00:00Z"
        }))
        .unwrap();

        assert!(delivery.is_withdrawn());
        assert!(delivery.withdrawn_at().is_some());
        assert_eq!(delivery.unit(), "12");
    }

    #[test]
    fn test_scope_paths() {
        assert_eq!(DeliveryScope::Own.collection(), "/deliveries");
        assert_eq!(DeliveryScope::Doorman.collection(), "/doorman/deliveries");
        assert_eq!(DeliveryScope::Syndic.collection(), "/syndic/deliveries");
    }
}
