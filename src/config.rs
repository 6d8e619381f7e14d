//! Configuration for the storefront client

use std::env;
use std::time::Duration;

use crate::error::Error;

/// Storage bucket holding the menu item photos
pub const DEFAULT_IMAGE_BUCKET: &str = "bubbletimeimage";

/// Value sent in the `X-Client-Info` header
pub const CLIENT_INFO: &str = concat!("bubbletime/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the storefront client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// The bucket menu item images are served from
    pub image_bucket: String,

    /// The `X-Client-Info` header value
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            image_bucket: DEFAULT_IMAGE_BUCKET.to_string(),
            client_info: CLIENT_INFO.to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the image bucket
    pub fn with_image_bucket(mut self, value: &str) -> Self {
        self.image_bucket = value.to_string();
        self
    }

    /// Set the client info header
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Connection settings for a Supabase project
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// The base URL for the Supabase project
    pub url: String,

    /// The anonymous API key for the Supabase project
    pub key: String,

    /// Client options
    pub options: ClientOptions,
}

impl StorefrontConfig {
    /// Read `SUPABASE_URL`, `SUPABASE_KEY` and the optional
    /// `BUBBLETIME_IMAGE_BUCKET` from the environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("SUPABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config("SUPABASE_URL must be set"))?;
        let key = lookup("SUPABASE_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config("SUPABASE_KEY must be set"))?;

        url::Url::parse(&url)?;

        let mut options = ClientOptions::default();
        if let Some(bucket) = lookup("BUBBLETIME_IMAGE_BUCKET") {
            options = options.with_image_bucket(&bucket);
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
            options,
        })
    }
}
