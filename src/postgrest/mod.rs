//! Database operations through the PostgREST API

mod query;
mod types;
mod filter;

use reqwest::Client;
use serde::Serialize;

use crate::config::ClientOptions;

pub use query::*;
pub use types::*;
pub use filter::*;

/// Client for database operations on one table
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// Bearer token; the anon key unless a user token was supplied
    token: Option<String>,

    /// The table or view name
    table: String,

    /// HTTP client
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl PostgrestClient {
    /// Create a new PostgrestClient
    pub(crate) fn new(url: &str, key: &str, table: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            token: None,
            table: table.to_string(),
            client,
            options,
        }
    }

    /// Send requests on behalf of a signed-in user
    pub fn with_auth(mut self, access_token: &str) -> Self {
        self.token = Some(access_token.to_string());
        self
    }

    /// Get the base URL for REST API requests
    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    fn request(&self) -> Request {
        Request {
            url: self.get_url(),
            key: self.key.clone(),
            token: self.token.clone().unwrap_or_else(|| self.key.clone()),
            client: self.client.clone(),
            options: self.options.clone(),
        }
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(self.request(), columns)
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(self.request(), values)
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.request())
    }
}
