//! Subscription endpoints.

use super::{
    client::{ApiClient, NO_BODY, text_field},
    errors::ApiError,
    messages,
    response::ApiResult,
    shapes::resolve_list,
};
use crate::models::{Checkout, Plan};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    subscription_plan: &'a str,
}

impl ApiClient {
    /// Public plan catalogue
    pub async fn list_plans(&self) -> ApiResult<Vec<Plan>> {
        self.call(
            Method::GET,
            "/plan",
            NO_BODY,
            None,
            messages::REQUEST_REJECTED,
            |body| resolve_list(&body, "plans"),
        )
        .await
    }

    /// Start a payment checkout for `plan_id`.
    pub async fn create_checkout(&self, token: &str, plan_id: &str) -> ApiResult<Checkout> {
        let request = CheckoutRequest {
            subscription_plan: plan_id,
        };

        self.call(
            Method::POST,
            "/plan/checkout",
            Some(&request),
            Some(token),
            messages::CHECKOUT_FAILED,
            |body| {
                let url = text_field(&body, "url")
                    .or_else(|| text_field(&body, "checkoutUrl"))
                    .ok_or_else(|| {
                        ApiError::MalformedResponse("checkout response has no URL".to_string())
                    })?;
                Ok(Checkout {
                    url,
                    message: text_field(&body, "message"),
                })
            },
        )
        .await
    }

    pub async fn cancel_subscription(&self, token: &str) -> ApiResult<()> {
        self.call(
            Method::POST,
            "/plan/cancel",
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }
}
