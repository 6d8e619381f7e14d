//! Query builder for PostgrestClient

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::postgrest::filter::FilterOperator;
use crate::postgrest::types::{Order, ReturnOption};

/// Everything a builder needs to send its request
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) url: String,
    pub(crate) key: String,
    pub(crate) token: String,
    pub(crate) client: Client,
    pub(crate) options: ClientOptions,
}

impl Request {
    fn headers<'a>(&self, fetch: FetchBuilder<'a>, write: bool) -> FetchBuilder<'a> {
        let profile = if write { "Content-Profile" } else { "Accept-Profile" };
        fetch
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .header(profile, &self.options.db_schema)
            .bearer_auth(&self.token)
            .timeout(self.options.request_timeout)
    }
}

/// Base query builder
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Query parameters, in the order they were added
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Set a parameter, replacing any earlier value for `key`
    pub fn set_param(&mut self, key: &str, value: &str) {
        self.params.retain(|(k, _)| k != key);
        self.params.push((key.to_string(), value.to_string()));
    }

    /// Add a `column=operator.value` filter.
    ///
    /// Filters on the same column accumulate; PostgREST ANDs them.
    pub fn add_filter(&mut self, column: &str, operator: FilterOperator, value: &str) {
        self.params.push((column.to_string(), operator.render(value)));
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Whether any filter has been added
    pub fn has_filters(&self) -> bool {
        self.params.iter().any(|(k, _)| !matches!(k.as_str(), "select" | "limit" | "order"))
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    request: Request,

    /// Query builder
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(request: Request, columns: &str) -> Self {
        let mut query = QueryBuilder::new();
        // PostgREST rejects whitespace inside embedded resource lists.
        let columns: String = columns.split_whitespace().collect();
        query.set_param("select", &columns);

        Self { request, query }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(&mut self, column: &str, value: T) -> &mut Self {
        self.query.add_filter(column, FilterOperator::Eq, &value.to_string());
        self
    }

    /// Filter rows where column matches a pattern (case insensitive)
    pub fn ilike(&mut self, column: &str, pattern: &str) -> &mut Self {
        self.query.add_filter(column, FilterOperator::ILike, pattern);
        self
    }

    /// Limit the number of rows returned
    pub fn limit(&mut self, count: usize) -> &mut Self {
        self.query.set_param("limit", &count.to_string());
        self
    }

    /// Order the results by a column
    pub fn order(&mut self, column: &str, order: Order) -> &mut Self {
        self.query.set_param("order", &format!("{}.{}", column, order.as_str()));
        self
    }

    /// The query string parameters this builder will send
    pub fn params(&self) -> &[(String, String)] {
        self.query.get_params()
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let fetch = Fetch::get(&self.request.client, &self.request.url)
            .query(self.query.get_params().to_vec());

        let result = self.request.headers(fetch, false).execute::<Vec<T>>().await?;
        Ok(result)
    }

    /// Execute the query and return the first row
    pub async fn execute_one<T: DeserializeOwned>(&mut self) -> Result<Option<T>, Error> {
        self.limit(1);

        let results = self.execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    request: Request,

    /// The values to insert
    values: T,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(request: Request, values: T) -> Self {
        Self { request, values }
    }

    /// Execute the query and return the inserted rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        let fetch = Fetch::post(&self.request.client, &self.request.url)
            .header("Prefer", &ReturnOption::Representation.prefer_header())
            .json(&self.values)?;

        let result = self.request.headers(fetch, true).execute::<Vec<R>>().await?;
        Ok(result)
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    request: Request,

    /// Query builder
    query: QueryBuilder,
}

impl DeleteBuilder {
    /// Create a new DeleteBuilder
    pub fn new(request: Request) -> Self {
        Self {
            request,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(&mut self, column: &str, value: V) -> &mut Self {
        self.query.add_filter(column, FilterOperator::Eq, &value.to_string());
        self
    }

    /// Execute the query without returning the deleted data.
    ///
    /// PostgREST refuses unfiltered deletes, and so does this builder.
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        if !self.query.has_filters() {
            return Err(Error::database("Refusing to delete without a filter"));
        }

        let fetch = Fetch::delete(&self.request.client, &self.request.url)
            .header("Prefer", &ReturnOption::Minimal.prefer_header())
            .query(self.query.get_params().to_vec());

        self.request.headers(fetch, true).execute_raw().await?;
        Ok(())
    }
}
