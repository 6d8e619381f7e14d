//! Bubble Time storefront client
//!
//! A Rust client for the Bubble Time café, backed by Supabase: browse the
//! menu, sign in, keep favorites and see which items customers like most.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod pages;
pub mod postgrest;
pub mod storage;

use reqwest::Client;

use crate::auth::Auth;
use crate::catalog::Catalog;
use crate::config::{ClientOptions, StorefrontConfig};
use crate::postgrest::PostgrestClient;
use crate::storage::StorageClient;

/// The main entry point for the storefront
#[derive(Debug, Clone)]
pub struct BubbleTime {
    /// The base URL for the Supabase project
    pub url: String,
    /// The anonymous API key for the Supabase project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl BubbleTime {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `supabase_url` - The base URL for your Supabase project
    /// * `supabase_key` - The anonymous API key for your Supabase project
    ///
    /// # Example
    ///
    /// ```
    /// use bubbletime::BubbleTime;
    ///
    /// let shop = BubbleTime::new("https://your-project-url.supabase.co", "your-anon-key");
    /// ```
    pub fn new(supabase_url: &str, supabase_key: &str) -> Self {
        Self::new_with_options(supabase_url, supabase_key, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use bubbletime::{BubbleTime, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_image_bucket("menu-photos");
    /// let shop = BubbleTime::new_with_options(
    ///     "https://your-project-url.supabase.co",
    ///     "your-anon-key",
    ///     options
    /// );
    /// ```
    pub fn new_with_options(supabase_url: &str, supabase_key: &str, options: ClientOptions) -> Self {
        Self {
            url: supabase_url.trim_end_matches('/').to_string(),
            key: supabase_key.to_string(),
            http_client: Client::new(),
            options,
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new_with_options(&config.url, &config.key, config.options.clone())
    }

    /// Auth client for sign-up, sign-in and sign-out
    pub fn auth(&self) -> Auth {
        Auth::new(&self.url, &self.key, self.http_client.clone(), self.options.clone())
    }

    /// Create a new PostgrestClient for a specific table or view
    pub fn from(&self, table: &str) -> PostgrestClient {
        PostgrestClient::new(
            &self.url,
            &self.key,
            table,
            self.http_client.clone(),
            self.options.clone(),
        )
    }

    /// Typed access to categories, menu items and favorites
    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.url, &self.key, self.http_client.clone(), self.options.clone())
    }

    /// Storage client for public object URLs
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(&self.url)
    }

    /// Name of the bucket holding menu item photos
    pub fn image_bucket(&self) -> &str {
        &self.options.image_bucket
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AuthContext, Session};
    pub use crate::catalog::{Category, FavoriteRecord, MenuItem, StorefrontSource};
    pub use crate::config::{ClientOptions, StorefrontConfig};
    pub use crate::error::Error;
    pub use crate::pages::ViewState;
    pub use crate::BubbleTime;
}
