//! Session store: login, logout, refresh, and the reactive state stream
//!
//! State transitions are atomic replacements persisted through the
//! KeyValueStore before they are broadcast. Refresh is coalesced: at most
//! one token exchange is in flight, and concurrent callers attach to its
//! outcome through a shared future.

use crate::error::{FindashError, FindashResult};
use crate::session::state::{Provider, SessionState, AUTH_STATE_KEY};
use crate::store::KeyValueStore;
use crate::transport::{HttpRequest, Method, Transport};
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Login credentials for a brokerage provider
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Details for creating a new backend user
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

type RefreshHandle = Shared<BoxFuture<'static, FindashResult<String>>>;

struct SessionInner {
    kv: KeyValueStore,
    transport: Arc<dyn Transport>,
    base_url: String,
    state: watch::Sender<SessionState>,
    /// In-flight refresh, installed before its network call begins and
    /// cleared by the refresh future once its outcome is known
    refresh_slot: Mutex<Option<RefreshHandle>>,
}

/// Authentication state owner
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Build a session store, hydrating state from the persisted snapshot.
    ///
    /// A snapshot that violates the state invariant or carries an
    /// already-expired token is dropped rather than restored.
    pub async fn connect(
        kv: KeyValueStore,
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
    ) -> FindashResult<Self> {
        let initial = match kv.get::<SessionState>(AUTH_STATE_KEY).await? {
            Some(saved) if saved.is_consistent() && !saved.token_expired() => {
                debug!("Restored session for provider {}", saved.provider.as_str());
                saved
            }
            Some(_) => {
                warn!("Dropping stale or inconsistent session snapshot");
                kv.remove(AUTH_STATE_KEY).await?;
                SessionState::empty()
            }
            None => SessionState::empty(),
        };

        let (state, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(SessionInner {
                kv,
                transport,
                base_url: base_url.into(),
                state,
                refresh_slot: Mutex::new(None),
            }),
        })
    }

    /// Current state snapshot
    pub fn current(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Whether a session token is held
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().authenticated
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver replays the current value to new subscribers and
    /// observes every subsequent atomic replacement.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Exchange credentials for a session token at the provider's login
    /// endpoint. On failure the previous state is left untouched.
    pub async fn login(&self, provider: Provider, credentials: &Credentials) -> FindashResult<()> {
        let endpoint = provider.login_endpoint().ok_or_else(|| {
            FindashError::User("No provider selected for login".to_string())
        })?;

        let response = self
            .inner
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: format!("{}{}", self.inner.base_url, endpoint),
                bearer: None,
                body: Some(json!({
                    "username": credentials.username,
                    "password": credentials.password,
                })),
            })
            .await?;

        if !response.is_success() {
            let reason = response.body["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", response.status));
            return Err(FindashError::LoginFailed {
                provider: provider.as_str().to_string(),
                reason,
            });
        }

        let token = response.body["token"].as_str().ok_or_else(|| {
            FindashError::LoginFailed {
                provider: provider.as_str().to_string(),
                reason: "response carried no token".to_string(),
            }
        })?;

        let state = SessionState::from_token(provider, token.to_string());
        Self::replace(&self.inner, state).await?;
        info!("Logged in via {}", provider.as_str());
        Ok(())
    }

    /// Create a new backend user.
    ///
    /// Registration does not start a session; callers log in afterwards
    /// with the provider of their choice.
    pub async fn register(&self, registration: &Registration) -> FindashResult<()> {
        let response = self
            .inner
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: format!("{}/auth/register", self.inner.base_url),
                bearer: None,
                body: Some(json!({
                    "username": registration.username,
                    "email": registration.email,
                    "password": registration.password,
                })),
            })
            .await?;

        if !response.is_success() {
            let reason = response.body["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", response.status));
            return Err(FindashError::RegistrationFailed { reason });
        }

        info!("Registered user {}", registration.username);
        Ok(())
    }

    /// Clear the session and remove the persisted snapshot.
    ///
    /// The response cache is deliberately untouched.
    pub async fn logout(&self) -> FindashResult<()> {
        self.inner.kv.remove(AUTH_STATE_KEY).await?;
        self.inner.state.send_replace(SessionState::empty());
        info!("Logged out");
        Ok(())
    }

    /// Exchange the current token for a renewed one.
    ///
    /// Safe with no session: returns a NoSession failure. Concurrent
    /// callers coalesce onto a single network exchange and all receive
    /// its outcome.
    pub async fn refresh(&self) -> FindashResult<String> {
        let handle = {
            let mut slot = self.inner.refresh_slot.lock().expect("refresh lock poisoned");
            if let Some(existing) = slot.as_ref() {
                debug!("Attaching to in-flight token refresh");
                existing.clone()
            } else {
                let inner = Arc::clone(&self.inner);
                let fut: BoxFuture<'static, FindashResult<String>> = Box::pin(async move {
                    let result = Self::exchange_token(&inner).await;
                    // Outcome known: clear the slot so the next auth
                    // failure starts a fresh exchange
                    inner.refresh_slot.lock().expect("refresh lock poisoned").take();
                    result
                });
                let shared = fut.shared();
                *slot = Some(shared.clone());
                shared
            }
        };

        handle.await
    }

    async fn exchange_token(inner: &Arc<SessionInner>) -> FindashResult<String> {
        let current = inner.state.borrow().clone();
        let token = current.token.ok_or(FindashError::NoSession)?;

        let response = inner
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: format!("{}/auth/refresh", inner.base_url),
                bearer: Some(token),
                body: None,
            })
            .await?;

        if !response.is_success() {
            warn!("Token refresh rejected with status {}", response.status);
            return Err(FindashError::SessionExpired);
        }

        let new_token = response.body["token"]
            .as_str()
            .ok_or(FindashError::SessionExpired)?
            .to_string();

        let state = SessionState::from_token(current.provider, new_token.clone());
        Self::replace(inner, state).await?;
        debug!("Session token refreshed");
        Ok(new_token)
    }

    /// Persist then broadcast a new state. Persist-first keeps the
    /// in-memory state and the snapshot from diverging on write failure.
    async fn replace(inner: &Arc<SessionInner>, state: SessionState) -> FindashResult<()> {
        inner.kv.set(AUTH_STATE_KEY, &state).await?;
        inner.state.send_replace(state);
        Ok(())
    }
}
