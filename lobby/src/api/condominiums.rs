//! Condominium and business admin overview endpoints.

use super::{
    client::{ApiClient, NO_BODY},
    messages,
    response::ApiResult,
    shapes::{resolve_item, resolve_list},
};
use crate::models::{AdminStats, Condominium, CondominiumSignUp};
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// Register a condominium under the business account owning `token`.
    pub async fn register_condominium(
        &self,
        token: &str,
        sign_up: &CondominiumSignUp,
    ) -> ApiResult<Value> {
        self.call(
            Method::POST,
            "/condominium/sign-up",
            Some(&sign_up.normalized()),
            Some(token),
            messages::REQUEST_REJECTED,
            Ok,
        )
        .await
    }

    pub async fn list_condominiums(&self, token: &str) -> ApiResult<Vec<Condominium>> {
        self.call(
            Method::GET,
            "/admin/condominiums",
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |body| resolve_list(&body, "condominiums"),
        )
        .await
    }

    pub async fn admin_stats(&self, token: &str) -> ApiResult<AdminStats> {
        self.call(
            Method::GET,
            "/admin/stats",
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |body| resolve_item(&body, "stats"),
        )
        .await
    }
}
