//! Backend API access with response normalization.
//!
//! Every call goes through [`ApiClient`] and resolves to an [`ApiResult`]:
//! - transport failures become a fixed connection message
//! - HTTP error statuses map through a fixed status table, unless the body
//!   carries problem details (`detail`, `title`)
//! - 2xx bodies with `success: false` are failures too
//! - payloads wrapped in any of the known shapes are unwrapped
//!
//! ## Example
//!
//! ```no_run
//! use lobby::api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = ApiClient::new("http://localhost:8080/api/v1");
//!     let me = api.fetch_current_account("token").await;
//!     match me.payload() {
//!         Some(account) => println!("Signed in as {}", account.display_name()),
//!         None => println!("{}", me.message().unwrap_or_default()),
//!     }
//! }
//! ```

pub mod accounts;
pub mod auth;
pub mod client;
pub mod condominiums;
pub mod deliveries;
pub mod errors;
pub mod messages;
pub mod plans;
pub mod response;
pub mod shapes;

pub use accounts::AdminScope;
pub use client::ApiClient;
pub use errors::ApiError;
pub use reqwest::Method;
pub use response::{ApiFailure, ApiResult};
