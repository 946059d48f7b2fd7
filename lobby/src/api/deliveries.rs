//! Delivery endpoints.

use super::{
    client::{ApiClient, NO_BODY},
    messages,
    response::ApiResult,
    shapes::{resolve_item, resolve_list},
};
use crate::models::{Delivery, DeliveryScope, RegisterDelivery};
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// List deliveries visible in `scope`.
    pub async fn list_deliveries(
        &self,
        token: &str,
        scope: DeliveryScope,
    ) -> ApiResult<Vec<Delivery>> {
        self.call(
            Method::GET,
            scope.collection(),
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |body| resolve_list(&body, "deliveries"),
        )
        .await
    }

    /// Look a delivery up by tracking code.
    pub async fn find_delivery(
        &self,
        token: &str,
        scope: DeliveryScope,
        tracking_code: &str,
    ) -> ApiResult<Delivery> {
        let endpoint = format!(
            "{}/{}",
            scope.collection(),
            urlencoding::encode(tracking_code.trim())
        );

        self.call(
            Method::GET,
            &endpoint,
            NO_BODY,
            Some(token),
            messages::DELIVERY_NOT_FOUND,
            |body| resolve_item(&body, "delivery"),
        )
        .await
    }

    /// Register a parcel that just arrived (doorman).
    pub async fn register_delivery(
        &self,
        token: &str,
        delivery: &RegisterDelivery,
    ) -> ApiResult<Value> {
        self.call(
            Method::POST,
            DeliveryScope::Doorman.collection(),
            Some(delivery),
            Some(token),
            messages::REQUEST_REJECTED,
            Ok,
        )
        .await
    }

    /// Confirm that a parcel was withdrawn by its recipient (doorman).
    pub async fn confirm_delivery(&self, token: &str, tracking_code: &str) -> ApiResult<()> {
        let endpoint = format!(
            "{}/{}/confirm",
            DeliveryScope::Doorman.collection(),
            urlencoding::encode(tracking_code.trim())
        );

        self.call(
            Method::PUT,
            &endpoint,
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }
}
