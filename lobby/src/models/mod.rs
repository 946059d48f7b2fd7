//! Data models exchanged with the Lobby backend.

pub mod account;
pub mod condominium;
pub mod delivery;
pub mod plan;

pub use account::{Account, AccountId, BanRequest, BanUnit, Role, RoleChange};
pub use condominium::{Address, AdminStats, Condominium, CondominiumSignUp};
pub use delivery::{Delivery, DeliveryScope, DoormanRef, RegisterDelivery};
pub use plan::{Checkout, Plan};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a field that the backend may send as `null`, falling back to
/// the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a numeric identifier that may arrive as a JSON number or a
/// numeric string.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{text}'"))),
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and zone-less ISO 8601 (`2024-05-01T10:00:00[.fff]`),
/// the latter interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let parsed = parse_timestamp("2024-05-01T10:00:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let parsed = parse_timestamp("2024-05-01T10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

        let fractional = parse_timestamp("2024-05-01T10:00:00.250").unwrap();
        assert_eq!(fractional.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_parse_garbage_timestamp() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
