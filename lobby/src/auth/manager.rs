//! Session manager implementation.

use super::{
    access::Access,
    models::{Session, SessionState, SignInRequest},
    storage::TokenStore,
};
use crate::api::{ApiClient, ApiError, ApiResult, messages};
use crate::models::Account;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Session manager
///
/// Single source of truth for who is signed in. Cloning yields another
/// handle to the same session.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    session: Arc<watch::Sender<Session>>,
}

/// Settles an in-flight authentication.
///
/// If the authenticating future is dropped before settling, the session
/// falls back to `Anonymous` so the loading flag never sticks.
struct PendingAuthentication<'a> {
    session: &'a watch::Sender<Session>,
    settled: bool,
}

impl<'a> PendingAuthentication<'a> {
    fn start(session: &'a watch::Sender<Session>) -> Self {
        session.send_modify(Session::begin_authentication);
        Self {
            session,
            settled: false,
        }
    }

    fn settle(mut self, next: Session) {
        self.settled = true;
        self.session.send_replace(next);
    }
}

impl Drop for PendingAuthentication<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.send_if_modified(|session| {
                if session.state() == SessionState::Authenticating {
                    *session = Session::anonymous();
                    true
                } else {
                    false
                }
            });
        }
    }
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Arguments
    ///
    /// * `api` - Client used to resolve tokens into accounts
    /// * `store` - Durable slot for the bearer token
    ///
    /// The session starts in `Initializing`; call [`restore`](Self::restore)
    /// once at startup.
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let (session, _) = watch::channel(Session::initializing());
        Self {
            api,
            store,
            session: Arc::new(session),
        }
    }

    /// Restore the session from the persisted token
    ///
    /// Without a stored token the session becomes `Anonymous` and no request
    /// is made. Otherwise the token is verified exactly like [`login`](Self::login).
    pub async fn restore(&self) -> Option<Account> {
        let stored = match self.store.load().await {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read persisted token: {e}");
                self.discard_token().await;
                None
            }
        };

        match stored {
            Some(token) => self.authenticate(token).await.into_payload(),
            None => {
                debug!("No persisted token, session is anonymous");
                self.session.send_replace(Session::anonymous());
                None
            }
        }
    }

    /// Adopt a freshly issued token
    ///
    /// # Returns
    ///
    /// * `Some(Account)` - Token verified and session authenticated. The token is
    ///   persisted; if the store refuses it, the store is left empty instead
    /// * `None` - Verification failed; session is anonymous and nothing is persisted
    pub async fn login(&self, token: impl Into<String>) -> Option<Account> {
        self.authenticate(token.into()).await.into_payload()
    }

    /// Exchange credentials for a token, then log in with it
    ///
    /// Unlike [`login`](Self::login) the failure message is kept, so a sign-in
    /// form can show it.
    pub async fn sign_in(&self, login: &str, password: &str) -> ApiResult<Account> {
        let request = SignInRequest {
            login: login.trim().to_string(),
            password: password.to_string(),
        };

        match self.api.sign_in(&request).await.into_result() {
            Ok(token) => self.authenticate(token).await,
            Err(failure) => {
                info!("Sign-in rejected: {failure}");
                failure.into()
            }
        }
    }

    /// End the session
    ///
    /// The backend is notified on a best-effort basis; the local session is
    /// always cleared and the persisted token removed.
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            let outcome = self.api.logout(&token).await;
            if !outcome.is_success() {
                warn!(
                    "Remote logout failed: {}",
                    outcome.message().unwrap_or_default()
                );
            }
        }

        self.discard_token().await;
        self.session.send_replace(Session::anonymous());
        info!("Session ended");
    }

    /// Drop the session locally after the backend rejected its token
    ///
    /// For callers that saw a 401 on an authenticated call. The backend is
    /// not notified since it no longer recognizes the token.
    pub async fn expire(&self) {
        if self.is_authenticated() {
            warn!("Session token no longer accepted, signing out");
        }
        self.discard_token().await;
        self.session.send_replace(Session::anonymous());
    }

    async fn authenticate(&self, token: String) -> ApiResult<Account> {
        let pending = PendingAuthentication::start(&self.session);

        let token = token.trim().to_string();
        let outcome: ApiResult<Account> = if token.is_empty() {
            ApiError::Status {
                status: 401,
                message: messages::status_message(401).to_string(),
            }
            .into()
        } else {
            self.api.fetch_current_account(&token).await
        };

        match outcome.payload() {
            Some(account) => {
                if let Err(e) = self.store.save(&token).await {
                    // The previous token must not outlive this session.
                    warn!("Failed to persist token, session will not survive a restart: {e}");
                    self.discard_token().await;
                }
                info!("Session authenticated for account {}", account.id);
                pending.settle(Session::authenticated(account.clone(), token));
            }
            None => {
                info!(
                    "Token rejected: {}",
                    outcome.message().unwrap_or_default()
                );
                self.discard_token().await;
                pending.settle(Session::anonymous());
            }
        }

        outcome
    }

    async fn discard_token(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to remove persisted token: {e}");
        }
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    pub fn user(&self) -> Option<Account> {
        self.session.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.session.borrow().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Route guard decision for the current session
    pub fn access(&self) -> Access {
        Access::for_session(&self.session.borrow())
    }

    /// API client the session verifies tokens with
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
