//! Bearer-token claims parsing
//!
//! The backend issues JWT-shaped tokens. Only the claims segment is
//! decoded here; signatures are the server's concern. Parsing fails
//! closed: any malformed token reads as "no claims", and a token with no
//! usable claims is treated as expired by callers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims carried in a bearer token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's id
    pub sub: Option<String>,

    pub email: Option<String>,

    pub name: Option<String>,

    /// Expiry as a unix timestamp in seconds
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Whether the claims are expired at `now`.
    ///
    /// Claims without an `exp` field never report expired; the server
    /// still rejects the token if it disagrees.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }

    /// Whether the claims are expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decode the claims segment of a bearer token.
///
/// Returns `None` for anything that is not a three-segment token with a
/// base64url JSON payload. Callers must treat `None` as an absent or
/// expired credential, never as an error to surface.
pub fn parse_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let decoded = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    serde_json::from_slice(&decoded).ok()
}
