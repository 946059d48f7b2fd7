//! # Lobby
//!
//! Client library for the Lobby condominium package service: residents,
//! doormen, syndics and business admins tracking parcel deliveries.
//!
//! ## Core Modules
//!
//! - [`auth`]: Session lifecycle, token persistence and route guarding
//! - [`api`]: Backend client that normalizes every response into an [`ApiResult`]
//! - [`models`]: Accounts, deliveries, plans and condominiums
//! - [`config`]: Environment-driven client configuration
//!
//! ## Example
//!
//! ```no_run
//! use lobby::{ApiClient, ClientConfig, SessionManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env(None, None)?;
//!     let session = SessionManager::new(
//!         ApiClient::from_config(&config)?,
//!         Arc::new(config.token_store()),
//!     );
//!
//!     session.restore().await;
//!     println!("Authenticated: {}", session.is_authenticated());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ApiFailure, ApiResult};
pub use auth::{Access, DashboardKind, SessionManager, SessionState};
pub use config::{ClientConfig, ConfigError};
pub use models::{Account, Role};
