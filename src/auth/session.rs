//! Session management for authentication

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::types::AuthResponse;
use crate::error::Error;

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

/// Claims read from a Supabase access token
#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: Option<String>,

    /// The user ID
    pub user_id: String,

    /// The user's email address
    pub email: Option<String>,

    /// The token type
    pub token_type: String,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

impl Session {
    /// Create a new session
    pub fn new(access_token: String, refresh_token: Option<String>, user_id: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            user_id,
            email: None,
            token_type: "bearer".to_string(),
            expires_at: Some(now() + expires_in),
        }
    }

    /// Restore a session from a bare access token.
    ///
    /// The signature is not checked here; the token is only trusted as far
    /// as the remote services accept it.
    pub fn from_access_token(access_token: &str) -> Result<Self, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(access_token, &DecodingKey::from_secret(&[]), &validation)?;

        Ok(Self {
            access_token: access_token.to_string(),
            refresh_token: None,
            user_id: data.claims.sub,
            email: data.claims.email,
            token_type: "bearer".to_string(),
            expires_at: data.claims.exp,
        })
    }

    /// Build a session from a token grant, if it carried a token
    pub fn from_response(response: &AuthResponse) -> Option<Self> {
        let access_token = response.access_token.clone()?;

        let claims = Self::from_access_token(&access_token).ok();
        let user_id = response
            .user
            .as_ref()
            .map(|u| u.id.clone())
            .or_else(|| claims.as_ref().map(|c| c.user_id.clone()))?;
        let email = response
            .user
            .as_ref()
            .and_then(|u| u.email.clone())
            .or_else(|| claims.as_ref().and_then(|c| c.email.clone()));
        let expires_at = response
            .expires_at
            .or_else(|| response.expires_in.map(|secs| now() + secs))
            .or_else(|| claims.as_ref().and_then(|c| c.expires_at));

        Some(Self {
            access_token,
            refresh_token: response.refresh_token.clone(),
            user_id,
            email,
            token_type: response
                .token_type
                .clone()
                .unwrap_or_else(|| "bearer".to_string()),
            expires_at,
        })
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now() >= expires_at,
            None => false,
        }
    }
}

/// Who the current caller is.
///
/// Passed explicitly to everything that behaves differently for signed-in
/// users, instead of being read from shared session storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthContext {
    /// No user is signed in
    #[default]
    Anonymous,

    /// A user is signed in with this session
    SignedIn(Session),
}

impl AuthContext {
    /// Context for a stored access token, or anonymous when there is none
    pub fn from_token(token: Option<&str>) -> Result<Self, Error> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Ok(AuthContext::SignedIn(Session::from_access_token(token)?)),
            None => Ok(AuthContext::Anonymous),
        }
    }

    /// The current session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthContext::SignedIn(session) => Some(session),
            AuthContext::Anonymous => None,
        }
    }

    /// The current session, or an auth error for anonymous callers
    pub fn require(&self) -> Result<&Session, Error> {
        match self.session() {
            Some(session) if session.is_expired() => Err(Error::auth("Session expired")),
            Some(session) => Ok(session),
            None => Err(Error::auth("Not logged in")),
        }
    }

    /// Whether a user is signed in
    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    /// The signed-in user's email address
    pub fn email(&self) -> Option<&str> {
        self.session().and_then(|s| s.email.as_deref())
    }
}
