//! Types for authentication and user management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::session::{AuthContext, Session};

/// Authentication response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The user data
    #[serde(default)]
    pub user: Option<User>,

    /// The access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// The refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// The token type
    #[serde(default)]
    pub token_type: Option<String>,

    /// The expiry time in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// The expiry timestamp, seconds since the epoch
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl AuthResponse {
    /// The context a caller should carry after this response.
    ///
    /// Sign-ups awaiting email confirmation come back without tokens and
    /// leave the caller anonymous.
    pub fn into_context(self) -> AuthContext {
        match Session::from_response(&self) {
            Some(session) => AuthContext::SignedIn(session),
            None => AuthContext::Anonymous,
        }
    }
}

/// User data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The app metadata
    #[serde(default)]
    pub app_metadata: HashMap<String, serde_json::Value>,

    /// The user metadata
    #[serde(default)]
    pub user_metadata: HashMap<String, serde_json::Value>,

    /// The user's email address
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the email has been confirmed
    #[serde(default)]
    pub email_confirmed_at: Option<String>,

    /// The last sign-in time
    #[serde(default)]
    pub last_sign_in_at: Option<String>,

    /// The creation time
    #[serde(default)]
    pub created_at: Option<String>,

    /// The user's role
    #[serde(default)]
    pub role: Option<String>,
}

/// Email and password credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    /// Email address
    pub email: &'a str,

    /// Password
    pub password: &'a str,
}
