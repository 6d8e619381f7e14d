//! Typed access to the café's tables

mod models;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::auth::AuthContext;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::postgrest::{Order, PostgrestClient};

pub use models::*;

/// Table holding the categories
pub const CATEGORIES_TABLE: &str = "categories";

/// Table holding the menu items
pub const MENU_ITEMS_TABLE: &str = "menuitem";

/// Table holding the favorite records
pub const FAVORITES_TABLE: &str = "favourites";

/// Read side of the catalog that the page loaders depend on
#[async_trait]
pub trait StorefrontSource: Send + Sync {
    /// All categories
    async fn categories(&self) -> Result<Vec<Category>, Error>;

    /// All menu items
    async fn menu_items(&self) -> Result<Vec<MenuItem>, Error>;

    /// All favorite records, with their menu items joined in
    async fn favorites(&self) -> Result<Vec<FavoriteRecord>, Error>;
}

/// Client for the categories, menu items and favourites tables
#[derive(Debug, Clone)]
pub struct Catalog {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client
    client: Client,

    /// Client options
    options: ClientOptions,
}

fn favorite_columns() -> String {
    format!("id, menuitem_id, user_id, menuitem ( {} )", MENU_ITEM_COLUMNS)
}

impl Catalog {
    /// Create a new Catalog
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            options,
        }
    }

    fn table(&self, table: &str) -> PostgrestClient {
        PostgrestClient::new(&self.url, &self.key, table, self.client.clone(), self.options.clone())
    }

    /// Menu items in one category
    pub async fn menu_items_in(&self, category_id: &str) -> Result<Vec<MenuItem>, Error> {
        self.table(MENU_ITEMS_TABLE)
            .select(MENU_ITEM_COLUMNS)
            .eq("category_id", category_id)
            .order("name", Order::Asc)
            .execute()
            .await
    }

    /// Menu items whose name contains `text`, ignoring case
    pub async fn search_menu(&self, text: &str) -> Result<Vec<MenuItem>, Error> {
        self.table(MENU_ITEMS_TABLE)
            .select(MENU_ITEM_COLUMNS)
            .ilike("name", &format!("*{}*", text.trim()))
            .order("name", Order::Asc)
            .execute()
            .await
    }

    /// One menu item by ID
    pub async fn menu_item(&self, id: &str) -> Result<Option<MenuItem>, Error> {
        self.table(MENU_ITEMS_TABLE)
            .select(MENU_ITEM_COLUMNS)
            .eq("id", id)
            .execute_one()
            .await
    }

    /// Favorite records of one user
    pub async fn favorites_of(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, Error> {
        self.table(FAVORITES_TABLE)
            .select(&favorite_columns())
            .eq("user_id", user_id)
            .execute()
            .await
    }

    /// Whether the signed-in user has favorited `menuitem_id`
    pub async fn is_favorite(&self, ctx: &AuthContext, menuitem_id: &str) -> Result<bool, Error> {
        let session = ctx.require()?;
        let rows: Vec<FavoriteRecord> = self
            .table(FAVORITES_TABLE)
            .with_auth(&session.access_token)
            .select("id, user_id, menuitem_id")
            .eq("user_id", &session.user_id)
            .eq("menuitem_id", menuitem_id)
            .limit(1)
            .execute()
            .await?;
        Ok(!rows.is_empty())
    }

    /// Favorite an item for the signed-in user.
    ///
    /// Returns `false` when the store already holds that favorite; the
    /// uniqueness constraint lives in the database.
    pub async fn add_favorite(&self, ctx: &AuthContext, menuitem_id: &str) -> Result<bool, Error> {
        let session = ctx.require()?;
        let row = NewFavorite {
            user_id: &session.user_id,
            menuitem_id,
        };

        let result: Result<Vec<FavoriteRecord>, Error> = self
            .table(FAVORITES_TABLE)
            .with_auth(&session.access_token)
            .insert(&row)
            .execute()
            .await;

        match result {
            Ok(rows) => {
                let id = rows.first().map(|r| r.id.as_str()).unwrap_or_default();
                info!("User {} favorited {} ({})", session.user_id, menuitem_id, id);
                Ok(true)
            }
            Err(e) if e.is_conflict() => {
                debug!("User {} already favorited {}", session.user_id, menuitem_id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the signed-in user's favorite for an item
    pub async fn remove_favorite(&self, ctx: &AuthContext, menuitem_id: &str) -> Result<(), Error> {
        let session = ctx.require()?;

        self.table(FAVORITES_TABLE)
            .with_auth(&session.access_token)
            .delete()
            .eq("user_id", &session.user_id)
            .eq("menuitem_id", menuitem_id)
            .execute_no_return()
            .await?;

        info!("User {} unfavorited {}", session.user_id, menuitem_id);
        Ok(())
    }
}

#[async_trait]
impl StorefrontSource for Catalog {
    async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.table(CATEGORIES_TABLE)
            .select("id, name")
            .order("name", Order::Asc)
            .execute()
            .await
    }

    async fn menu_items(&self) -> Result<Vec<MenuItem>, Error> {
        self.table(MENU_ITEMS_TABLE)
            .select(MENU_ITEM_COLUMNS)
            .order("name", Order::Asc)
            .execute()
            .await
    }

    async fn favorites(&self) -> Result<Vec<FavoriteRecord>, Error> {
        self.table(FAVORITES_TABLE)
            .select(&favorite_columns())
            .execute()
            .await
    }
}
