//! The favorites page: top five food and top five drinks

use log::error;

use super::{price_label, ViewState};
use crate::catalog::{Category, FavoriteRecord, StorefrontSource};
use crate::favorites::{top_favorites, RankedItem};
use crate::storage::BucketClient;

/// Message shown when any fetch fails
pub const LOAD_FAILED: &str = "Failed to load favorites";

/// Message shown when there are no categories to classify items with
pub const NO_CATEGORIES: &str = "No categories found";

/// Message shown when nothing has been favorited
pub const NO_FAVORITES: &str = "No favorites yet";

/// A ranked item card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteCard {
    /// Position in its list, starting at 1
    pub rank: usize,
    /// Item ID
    pub id: String,
    /// Item name
    pub name: String,
    /// Formatted price
    pub price_label: String,
    /// How many users favorited the item
    pub favorite_count: usize,
    /// Public photo URL
    pub image_url: Option<String>,
}

impl FavoriteCard {
    pub(crate) fn new(rank: usize, entry: &RankedItem, images: &BucketClient<'_>) -> Self {
        FavoriteCard {
            rank,
            id: entry.item.id.clone(),
            name: entry.item.name.clone(),
            price_label: price_label(entry.item.price),
            favorite_count: entry.favorite_count,
            image_url: images.image_url(entry.item.image_url.as_deref()),
        }
    }
}

/// Favorites page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesPage {
    /// Top 5 Favorite Foods
    pub food: Vec<FavoriteCard>,
    /// Top 5 Favorite Drinks
    pub drinks: Vec<FavoriteCard>,
}

fn cards(entries: &[RankedItem], images: &BucketClient<'_>) -> Vec<FavoriteCard> {
    entries
        .iter()
        .enumerate()
        .map(|(n, entry)| FavoriteCard::new(n + 1, entry, images))
        .collect()
}

/// Fetch categories, then favorites.
///
/// Stops at the first failure, and treats an empty category list as one.
pub(crate) async fn fetch_inputs<S>(source: &S) -> Result<(Vec<Category>, Vec<FavoriteRecord>), String>
where
    S: StorefrontSource + ?Sized,
{
    let categories = source.categories().await.map_err(|e| {
        error!("Error fetching categories: {}", e);
        LOAD_FAILED.to_string()
    })?;
    if categories.is_empty() {
        return Err(NO_CATEGORIES.to_string());
    }

    let favorites = source.favorites().await.map_err(|e| {
        error!("Error fetching favorites: {}", e);
        LOAD_FAILED.to_string()
    })?;

    Ok((categories, favorites))
}

/// Load the favorites page
pub async fn load<S>(source: &S, images: &BucketClient<'_>) -> ViewState<FavoritesPage>
where
    S: StorefrontSource + ?Sized,
{
    let (categories, favorites) = match fetch_inputs(source).await {
        Ok(inputs) => inputs,
        Err(message) => return ViewState::Failed(message),
    };

    let top = top_favorites(&favorites, &categories);
    if top.is_empty() {
        return ViewState::Empty(NO_FAVORITES.to_string());
    }

    ViewState::Ready(FavoritesPage {
        food: cards(&top.food, images),
        drinks: cards(&top.drinks, images),
    })
}
