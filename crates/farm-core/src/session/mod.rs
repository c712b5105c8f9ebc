//! Auth Session
//!
//! Owns the signed-in user, their farm and the bearer token. Persistence goes
//! through a [`TokenStore`], the backend through an [`AuthApi`], and the login
//! debounce through a [`Clock`], so the whole lifecycle runs outside a browser.
//!
//! State sits in a `RefCell` that is never borrowed across an `.await`.

mod clock;
mod deep_link;
mod token_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use deep_link::take_query_param;
pub use token_store::{MemoryTokenStore, TokenLocations, TokenStore};

use std::cell::RefCell;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi, LoginRequest, RegisterRequest};
use crate::config::AppConfig;
use crate::domain::{Farm, User};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Please wait a moment before trying again")]
    TooManyAttempts,
    #[error("Please enter your email or phone number and password")]
    MissingCredentials,
    #[error("You are not signed in")]
    MissingToken,
    #[error("No farm is linked to this account yet")]
    NoFarm,
    #[error("Signed in, but your account could not be loaded. Please try again")]
    ProfileUnavailable,
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Where the UI goes after an auth transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Admin,
    Dashboard,
    Home,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Admin => "/admin",
            Redirect::Dashboard => "/dashboard",
            Redirect::Home => "/",
        }
    }
}

/// Result of reading a persisted token at startup
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    Anonymous,
    Restored(User),
    /// A token was stored but the backend rejected it; both copies are gone
    Expired,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    farm: Option<Farm>,
    token: Option<String>,
    last_login_attempt_ms: Option<u64>,
}

pub struct AuthSession<A: AuthApi, S: TokenStore, C: Clock = SystemClock> {
    api: A,
    store: S,
    clock: C,
    debounce_ms: u64,
    state: RefCell<SessionState>,
}

impl<A: AuthApi, S: TokenStore> AuthSession<A, S, SystemClock> {
    pub fn new(api: A, store: S, config: &AppConfig) -> Self {
        Self::with_clock(api, store, SystemClock, config)
    }
}

impl<A: AuthApi, S: TokenStore, C: Clock> AuthSession<A, S, C> {
    pub fn with_clock(api: A, store: S, clock: C, config: &AppConfig) -> Self {
        Self {
            api,
            store,
            clock,
            debounce_ms: config.login_debounce_ms,
            state: RefCell::new(SessionState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn farm(&self) -> Option<Farm> {
        self.state.borrow().farm.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.state.borrow();
        state.token.is_some() && state.user.is_some()
    }

    /// Replace the cached farm, e.g. after the user creates or edits it
    pub fn set_farm(&self, farm: Option<Farm>) {
        self.state.borrow_mut().farm = farm;
    }

    /// Sign in with an email or phone number.
    ///
    /// A second call within the debounce window is rejected before any
    /// request is made. Empty credentials still count as an attempt.
    pub async fn login(&self, identifier: &str, password: &str) -> SessionResult<Redirect> {
        let now = self.clock.now_ms();
        {
            let mut state = self.state.borrow_mut();
            if let Some(last) = state.last_login_attempt_ms {
                if now.saturating_sub(last) < self.debounce_ms {
                    warn!("login attempt ignored: too soon after previous attempt");
                    return Err(SessionError::TooManyAttempts);
                }
            }
            state.last_login_attempt_ms = Some(now);
        }

        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let request = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.inspect_err(|e| {
            warn!(error = %e, "login failed");
        })?;
        let user = self.establish(response.token, response.user).await?;

        info!(user = %user.id, "logged in");
        Ok(if user.is_admin() { Redirect::Admin } else { Redirect::Dashboard })
    }

    /// Create an account; new accounts always land on the dashboard
    pub async fn register(&self, request: &RegisterRequest) -> SessionResult<Redirect> {
        let response = self.api.register(request).await.inspect_err(|e| {
            warn!(error = %e, "registration failed");
        })?;
        let user = self.establish(response.token, response.user).await?;
        info!(user = %user.id, "registered");
        Ok(Redirect::Dashboard)
    }

    /// Forget everything; both token locations are cleared
    pub fn logout(&self) -> Redirect {
        self.reset();
        info!("logged out");
        Redirect::Home
    }

    /// Pick up a persisted token at startup
    pub async fn restore(&self) -> RestoreOutcome {
        let Some(token) = self.store.load().filter(|t| !t.is_empty()) else {
            return RestoreOutcome::Anonymous;
        };

        match self.api.profile(&token).await {
            Ok(user) => {
                let farm = self.first_farm(&token).await;
                let mut state = self.state.borrow_mut();
                state.token = Some(token);
                state.user = Some(user.clone());
                state.farm = farm;
                info!(user = %user.id, "session restored");
                RestoreOutcome::Restored(user)
            }
            Err(e) => {
                warn!(error = %e, "stored token rejected, clearing session");
                self.reset();
                RestoreOutcome::Expired
            }
        }
    }

    /// Persist a token handed over in the URL
    pub fn adopt_url_token(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        self.store.save(token);
        self.state.borrow_mut().token = Some(token.to_string());
        info!("adopted token from URL");
    }

    /// Re-fetch the farm list and cache the first one
    pub async fn refresh_farm(&self) -> SessionResult<Farm> {
        let token = self.token().ok_or(SessionError::MissingToken)?;
        let farm = self
            .api
            .farms(&token)
            .await?
            .into_iter()
            .next()
            .ok_or(SessionError::NoFarm)?;
        self.state.borrow_mut().farm = Some(farm.clone());
        Ok(farm)
    }

    /// Resolve the user for a fresh token, then persist it.
    ///
    /// Nothing is written until the user is known; a failure leaves the
    /// session signed out in memory and in both token locations.
    async fn establish(&self, token: String, fallback: Option<User>) -> SessionResult<User> {
        let user = match self.api.profile(&token).await {
            Ok(user) => user,
            Err(e) => match fallback {
                Some(user) => {
                    warn!(error = %e, "profile fetch failed after sign-in, using the user from the response");
                    user
                }
                None => {
                    warn!(error = %e, "profile fetch failed after sign-in, discarding token");
                    self.reset();
                    return Err(match e {
                        ApiError::Unauthorized(_) => SessionError::ProfileUnavailable,
                        other => other.into(),
                    });
                }
            },
        };
        let farm = self.first_farm(&token).await;

        self.store.save(&token);
        debug!(token_len = token.len(), "token persisted");
        let mut state = self.state.borrow_mut();
        state.token = Some(token);
        state.user = Some(user.clone());
        state.farm = farm;
        Ok(user)
    }

    fn reset(&self) {
        self.store.clear();
        let mut state = self.state.borrow_mut();
        state.token = None;
        state.user = None;
        state.farm = None;
    }

    async fn first_farm(&self, token: &str) -> Option<Farm> {
        match self.api.farms(token).await {
            Ok(farms) => farms.into_iter().next(),
            Err(e) => {
                warn!(error = %e, "could not load farms");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, AuthResponse};
    use crate::domain::Role;
    use async_trait::async_trait;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeApi {
        login_calls: Cell<usize>,
        profile_calls: Cell<usize>,
        admin: bool,
        reject_login: bool,
        reject_profile: bool,
        no_farms: bool,
        user_in_response: bool,
    }

    impl FakeApi {
        fn user(&self) -> User {
            User {
                id: "u1".to_string(),
                first_name: "Wanjiku".to_string(),
                role: if self.admin { Role::Admin } else { Role::User },
                ..User::default()
            }
        }

        fn response(&self, token: &str) -> AuthResponse {
            AuthResponse {
                token: token.to_string(),
                user: self.user_in_response.then(|| self.user()),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeApi {
        async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
            self.login_calls.set(self.login_calls.get() + 1);
            if self.reject_login {
                return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
            }
            Ok(self.response("jwt-1"))
        }

        async fn register(&self, _request: &RegisterRequest) -> ApiResult<AuthResponse> {
            Ok(self.response("jwt-new"))
        }

        async fn profile(&self, _token: &str) -> ApiResult<User> {
            self.profile_calls.set(self.profile_calls.get() + 1);
            if self.reject_profile {
                return Err(ApiError::from_response(401, ""));
            }
            Ok(self.user())
        }

        async fn farms(&self, _token: &str) -> ApiResult<Vec<Farm>> {
            if self.no_farms {
                return Ok(Vec::new());
            }
            Ok(vec![
                Farm { id: "f1".to_string(), name: "Shamba".to_string(), ..Farm::default() },
                Farm { id: "f2".to_string(), name: "Second".to_string(), ..Farm::default() },
            ])
        }
    }

    fn session(api: FakeApi) -> AuthSession<FakeApi, MemoryTokenStore, ManualClock> {
        let config = AppConfig::default();
        let store = MemoryTokenStore::new(TokenLocations::from_config(&config));
        AuthSession::with_clock(api, store, ManualClock::new(1_000_000), &config)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_loads_first_farm() {
        let session = session(FakeApi::default());
        let redirect = session.login("  farmer@example.com ", "secret").await.unwrap();

        assert_eq!(redirect, Redirect::Dashboard);
        assert_eq!(session.token().as_deref(), Some("jwt-1"));
        assert_eq!(session.store().storage_value().as_deref(), Some("jwt-1"));
        assert_eq!(session.store().cookie_value().as_deref(), Some("jwt-1"));
        assert_eq!(session.farm().unwrap().id, "f1");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_admin_login_redirects_to_admin() {
        let session = session(FakeApi { admin: true, ..FakeApi::default() });
        let redirect = session.login("admin@example.com", "secret").await.unwrap();
        assert_eq!(redirect.path(), "/admin");
    }

    #[tokio::test]
    async fn test_second_login_within_window_is_rejected_without_request() {
        let session = session(FakeApi { reject_login: true, ..FakeApi::default() });

        let first = session.login("farmer@example.com", "wrong").await;
        assert!(matches!(first, Err(SessionError::Api(_))));
        let second = session.login("farmer@example.com", "wrong").await;
        assert_eq!(second, Err(SessionError::TooManyAttempts));
        assert_eq!(session.api().login_calls.get(), 1);

        session.clock.advance(2_000);
        let third = session.login("farmer@example.com", "wrong").await;
        assert!(matches!(third, Err(SessionError::Api(_))));
        assert_eq!(session.api().login_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let session = session(FakeApi { reject_login: true, ..FakeApi::default() });
        let err = session.login("farmer@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_login_with_unloadable_profile_persists_nothing() {
        let session = session(FakeApi { reject_profile: true, ..FakeApi::default() });
        let err = session.login("farmer@example.com", "secret").await.unwrap_err();

        assert_eq!(err, SessionError::ProfileUnavailable);
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.store().load(), None);
        assert_eq!(session.store().storage_value(), None);
        assert_eq!(session.store().cookie_value(), None);
    }

    #[tokio::test]
    async fn test_register_with_unloadable_profile_persists_nothing() {
        let session = session(FakeApi { reject_profile: true, ..FakeApi::default() });
        let err = session.register(&RegisterRequest::default()).await.unwrap_err();

        assert_eq!(err, SessionError::ProfileUnavailable);
        assert!(session.token().is_none());
        assert_eq!(session.store().load(), None);
    }

    #[tokio::test]
    async fn test_login_falls_back_to_user_in_response() {
        let session = session(FakeApi {
            reject_profile: true,
            user_in_response: true,
            ..FakeApi::default()
        });
        let redirect = session.login("farmer@example.com", "secret").await.unwrap();

        assert_eq!(redirect, Redirect::Dashboard);
        assert_eq!(session.user().unwrap().first_name, "Wanjiku");
        assert_eq!(session.store().cookie_value().as_deref(), Some("jwt-1"));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_admin_fallback_user_redirects_to_admin() {
        let session = session(FakeApi {
            admin: true,
            reject_profile: true,
            user_in_response: true,
            ..FakeApi::default()
        });
        let redirect = session.login("admin@example.com", "secret").await.unwrap();
        assert_eq!(redirect, Redirect::Admin);
        assert_eq!(session.api().profile_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_empty_credentials_skip_network_but_count_as_attempt() {
        let session = session(FakeApi::default());
        assert_eq!(session.login("   ", "pw").await, Err(SessionError::MissingCredentials));
        assert_eq!(session.api().login_calls.get(), 0);
        assert_eq!(session.login("a@b.c", "pw").await, Err(SessionError::TooManyAttempts));
    }

    #[tokio::test]
    async fn test_register_always_lands_on_dashboard() {
        let session = session(FakeApi { admin: true, ..FakeApi::default() });
        let redirect = session.register(&RegisterRequest::default()).await.unwrap();
        assert_eq!(redirect, Redirect::Dashboard);
        assert_eq!(session.token().as_deref(), Some("jwt-new"));
    }

    #[tokio::test]
    async fn test_logout_clears_both_locations() {
        let session = session(FakeApi::default());
        session.login("farmer@example.com", "secret").await.unwrap();

        assert_eq!(session.logout(), Redirect::Home);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(session.farm().is_none());
        assert_eq!(session.store().storage_value(), None);
        assert_eq!(session.store().cookie_value(), None);
    }

    #[tokio::test]
    async fn test_restore_without_token_is_anonymous() {
        let session = session(FakeApi::default());
        assert_eq!(session.restore().await, RestoreOutcome::Anonymous);
        assert_eq!(session.api().profile_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let session = session(FakeApi::default());
        session.store().save("stored");
        let outcome = session.restore().await;
        assert!(matches!(outcome, RestoreOutcome::Restored(ref user) if user.id == "u1"));
        assert_eq!(session.token().as_deref(), Some("stored"));
        assert_eq!(session.farm().unwrap().name, "Shamba");
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_it() {
        let session = session(FakeApi { reject_profile: true, ..FakeApi::default() });
        session.store().save("stale");
        assert_eq!(session.restore().await, RestoreOutcome::Expired);
        assert_eq!(session.store().load(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_adopt_url_token_persists_once() {
        let session = session(FakeApi::default());
        session.adopt_url_token(" deep-link ");
        assert_eq!(session.store().storage_value().as_deref(), Some("deep-link"));
        assert_eq!(session.store().cookie_value().as_deref(), Some("deep-link"));
        session.adopt_url_token("");
        assert_eq!(session.token().as_deref(), Some("deep-link"));
    }

    #[tokio::test]
    async fn test_refresh_farm() {
        let session = session(FakeApi { no_farms: true, ..FakeApi::default() });
        assert_eq!(session.refresh_farm().await, Err(SessionError::MissingToken));

        session.login("farmer@example.com", "secret").await.unwrap();
        assert!(session.farm().is_none());
        assert_eq!(session.refresh_farm().await, Err(SessionError::NoFarm));
    }
}
