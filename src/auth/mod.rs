//! Authentication and user management for the storefront

mod types;
mod session;

use log::{debug, info};
use reqwest::Client;
use serde_json::json;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

pub use types::*;
pub use session::*;

/// Client for Supabase Authentication.
///
/// Holds no session of its own: sign-in hands back an [`AuthContext`] and
/// every user-scoped call takes one.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    fn with_headers<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        fetch
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
    }

    /// Sign up a new user with email and password
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let url = self.get_auth_url("/signup");

        let fetch = Fetch::post(&self.client, &url).json(&Credentials { email, password })?;
        let result = self.with_headers(fetch).execute::<AuthResponse>().await?;

        info!("Signed up {}", email);
        Ok(result)
    }

    /// Sign in a user with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthContext, Error> {
        let url = self.get_auth_url("/token?grant_type=password");

        let fetch = Fetch::post(&self.client, &url).json(&Credentials { email, password })?;
        let result = self.with_headers(fetch).execute::<AuthResponse>().await?;

        match result.into_context() {
            AuthContext::Anonymous => Err(Error::auth("Sign-in returned no session")),
            ctx => {
                info!("Signed in {}", email);
                Ok(ctx)
            }
        }
    }

    /// Exchange the context's refresh token for a fresh session
    pub async fn refresh(&self, ctx: &AuthContext) -> Result<AuthContext, Error> {
        let refresh_token = ctx
            .session()
            .and_then(|s| s.refresh_token.as_deref())
            .ok_or_else(|| Error::auth("No refresh token"))?;

        self.refresh_token(refresh_token).await
    }

    /// Exchange a bare refresh token for a fresh session
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthContext, Error> {
        let url = self.get_auth_url("/token?grant_type=refresh_token");

        let fetch = Fetch::post(&self.client, &url).json(&json!({ "refresh_token": refresh_token }))?;
        let result = self.with_headers(fetch).execute::<AuthResponse>().await?;

        match result.into_context() {
            AuthContext::Anonymous => Err(Error::auth("Refresh returned no session")),
            ctx => {
                debug!("Refreshed session for {:?}", ctx.email());
                Ok(ctx)
            }
        }
    }

    /// Sign out the user of `ctx`; the caller should carry the returned context
    pub async fn sign_out(&self, ctx: &AuthContext) -> Result<AuthContext, Error> {
        let url = self.get_auth_url("/logout");
        let token = ctx
            .session()
            .map(|s| s.access_token.clone())
            .ok_or_else(|| Error::auth("Not logged in"))?;

        let fetch = Fetch::post(&self.client, &url).bearer_auth(&token);
        self.with_headers(fetch).execute_raw().await?;

        debug!("Signed out {:?}", ctx.email());
        Ok(AuthContext::Anonymous)
    }

    /// Get the user data for the user of `ctx`
    pub async fn get_user(&self, ctx: &AuthContext) -> Result<User, Error> {
        let url = self.get_auth_url("/user");
        let session = ctx.require()?;

        let fetch = Fetch::get(&self.client, &url).bearer_auth(&session.access_token);
        let user = self.with_headers(fetch).execute::<User>().await?;

        Ok(user)
    }
}
