//! Client-side session lifecycle.
//!
//! The [`SessionManager`] owns who is signed in:
//! - the persisted bearer token is checked once at startup
//! - tokens are verified against the backend before the session counts as
//!   authenticated
//! - every failure ends in an anonymous session with the token discarded
//!
//! ## Example
//!
//! ```no_run
//! use lobby::api::ApiClient;
//! use lobby::auth::{FileTokenStore, SessionManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = ApiClient::new("http://localhost:8080/api/v1");
//!     let session = SessionManager::new(api, Arc::new(FileTokenStore::new("/tmp/lobby")));
//!
//!     match session.restore().await {
//!         Some(account) => println!("Welcome back, {}", account.display_name()),
//!         None => println!("Please sign in"),
//!     }
//! }
//! ```

pub mod access;
pub mod errors;
pub mod manager;
pub mod models;
pub mod storage;

pub use access::{Access, DashboardKind};
pub use errors::{StorageError, StorageResult};
pub use manager::SessionManager;
pub use models::{
    PasswordResetConfirm, PasswordResetRequest, Session, SessionState, SignInRequest,
    SignUpRequest,
};
pub use storage::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};
