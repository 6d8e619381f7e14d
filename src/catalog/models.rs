//! Rows of the café's tables

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Columns fetched for a menu item, wherever it is selected
pub const MENU_ITEM_COLUMNS: &str = "id, name, price, category_id, image_url";

/// A purchasable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// The item ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Price in ringgit
    pub price: Decimal,

    /// The category this item is listed under
    pub category_id: String,

    /// Storage path of the item's photo
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A named grouping of menu items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category ID
    pub id: String,

    /// Display name
    pub name: String,
}

/// One user's preference for one menu item, with the item joined in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// The record ID
    pub id: String,

    /// Who favorited the item
    pub user_id: String,

    /// The favorited item's ID
    #[serde(default)]
    pub menuitem_id: Option<String>,

    /// The joined item; `None` when the reference dangles
    #[serde(default, rename = "menuitem")]
    pub menu_item: Option<MenuItem>,
}

/// Row written when a user favorites an item
#[derive(Debug, Clone, Serialize)]
pub struct NewFavorite<'a> {
    /// Who is favoriting
    pub user_id: &'a str,

    /// What they are favoriting
    pub menuitem_id: &'a str,
}

impl Category {
    /// Whether the display name contains `needle`, ignoring case
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}
