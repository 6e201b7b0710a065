//! Session state model
//!
//! The whole state is replaced atomically on every transition; nothing
//! field-patches it. `authenticated` is true exactly when a token is
//! present.

use crate::token::{self, TokenClaims};
use serde::{Deserialize, Serialize};

/// KeyValueStore key holding the persisted session snapshot
pub const AUTH_STATE_KEY: &str = "auth_state";

/// Brokerage provider a session is connected through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    None,
    Schwab,
    Fidelity,
}

impl Provider {
    /// Path segment of the login endpoint for this provider
    pub fn login_endpoint(&self) -> Option<&'static str> {
        match self {
            Provider::None => None,
            Provider::Schwab => Some("/auth/schwab"),
            Provider::Fidelity => Some("/auth/fidelity"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::None => "none",
            Provider::Schwab => "schwab",
            Provider::Fidelity => "fidelity",
        }
    }
}

/// The authenticated principal, derived from token claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<&TokenClaims> for Principal {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
        }
    }
}

/// Authentication state snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub principal: Option<Principal>,
    pub token: Option<String>,
    pub provider: Provider,
}

impl SessionState {
    /// The logged-out state
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an authenticated state from a provider and token.
    ///
    /// The principal is derived from the token claims when they parse;
    /// an opaque token still yields a valid authenticated state.
    pub fn from_token(provider: Provider, token: String) -> Self {
        let principal = token::parse_claims(&token)
            .as_ref()
            .map(Principal::from);
        Self {
            authenticated: true,
            principal,
            token: Some(token),
            provider,
        }
    }

    /// Check the authenticated ⇔ token-present invariant.
    ///
    /// Persisted snapshots are validated against this on hydration.
    pub fn is_consistent(&self) -> bool {
        self.authenticated == self.token.is_some()
    }

    /// Whether the embedded token's claims are already expired
    pub fn token_expired(&self) -> bool {
        self.token
            .as_deref()
            .and_then(token::parse_claims)
            .is_some_and(|claims| claims.is_expired())
    }
}
