//! Condominium models.

use super::{lenient_id, null_as_default};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Postal address of a condominium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub zip_code: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Condominium registration body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumSignUp {
    pub name: String,
    pub cnpj: String,
    pub business_email: String,
    pub business_phone: String,
    pub blocks_count: u32,
    pub apartment_count: u32,
    pub address: Address,
}

impl CondominiumSignUp {
    /// Copy with CNPJ and phone reduced to digits, as the backend expects.
    pub fn normalized(&self) -> Self {
        Self {
            cnpj: digits_only(&self.cnpj),
            business_phone: digits_only(&self.business_phone),
            address: Address {
                zip_code: digits_only(&self.address.zip_code),
                ..self.address.clone()
            },
            ..self.clone()
        }
    }
}

/// Condominium as listed for business admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condominium {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_residents: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Business admin overview counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    #[serde(deserialize_with = "null_as_default")]
    pub total_condominiums: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_deliveries: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_approvals: u64,
}

/// Strip everything but ASCII digits (CPF, CNPJ, phone and ZIP masks).
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12.345.678/0001-90"), "12345678000190");
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only(""), "");
    }

    #[test]
    fn test_condominium_sign_up_normalized() {
        let sign_up = CondominiumSignUp {
            name: "Jardim".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
            business_email: "adm@jardim.com".to_string(),
            business_phone: "(11) 3333-4444".to_string(),
            blocks_count: 2,
            apartment_count: 40,
            address: Address {
                zip_code: "01310-100".to_string(),
                street: "Av. Paulista".to_string(),
                number: "1000".to_string(),
                complement: String::new(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
        };

        let normalized = sign_up.normalized();
        assert_eq!(normalized.cnpj, "12345678000190");
        assert_eq!(normalized.business_phone, "1133334444");
        assert_eq!(normalized.address.zip_code, "01310100");
        assert_eq!(normalized.address.street, "Av. Paulista");
    }

    #[test]
    fn test_admin_stats_defaults_missing_counters() {
        let stats: AdminStats = serde_json::from_value(serde_json::json!({
            "totalUsers": 12,
            "pendingApprovals": null
        }))
        .unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_approvals, 0);
        assert_eq!(stats.total_condominiums, 0);
    }
}
