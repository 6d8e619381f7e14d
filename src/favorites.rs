//! Ranking of menu items by how many users favorited them.
//!
//! Counting is one pure step, [`count_favorites`]. The two ways the
//! storefront presents the counts are layered on top of it:
//! [`top_by_kind`] splits items into food and drinks and keeps the top five
//! of each, while [`leaderboard`] keeps a single top ten labelled with the
//! category name.

use log::trace;
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{Category, FavoriteRecord, MenuItem};

/// Entries kept per bucket by [`top_by_kind`]
pub const TOP_PER_KIND: usize = 5;

/// Entries kept by [`leaderboard`]
pub const LEADERBOARD_SIZE: usize = 10;

/// Label for items whose category is not in the category list
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// A menu item with the number of favorite records pointing at it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    /// The item, as embedded in the first record that referenced it
    #[serde(flatten)]
    pub item: MenuItem,

    /// Number of favorite records referencing the item
    pub favorite_count: usize,
}

/// A leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// The ranked item
    #[serde(flatten)]
    pub ranked: RankedItem,

    /// Display name of the item's category
    pub category_name: String,
}

/// The split presentation: most favorited food and drinks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopFavorites {
    /// Items in a category whose name contains "food"
    pub food: Vec<RankedItem>,

    /// Items in a category whose name contains "drink"
    pub drinks: Vec<RankedItem>,
}

impl TopFavorites {
    /// Whether neither bucket has anything in it
    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.drinks.is_empty()
    }
}

/// Which bucket of [`TopFavorites`] an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Food bucket
    Food,
    /// Drinks bucket
    Drink,
}

impl Kind {
    /// Classify a category ID against the category list.
    ///
    /// An ID matching neither substring, or matching both, belongs to no
    /// bucket.
    pub fn of(category_id: &str, categories: &[Category]) -> Option<Kind> {
        let named = |needle: &str| {
            categories
                .iter()
                .filter(|c| c.id == category_id)
                .any(|c| c.name_contains(needle))
        };
        let food = named("food");
        let drink = named("drink");

        match (food, drink) {
            (true, false) => Some(Kind::Food),
            (false, true) => Some(Kind::Drink),
            _ => None,
        }
    }
}

/// Count favorite records per menu item.
///
/// Items come back in the order they were first seen. Records without an
/// embedded item are skipped.
pub fn count_favorites(records: &[FavoriteRecord]) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let item = match &record.menu_item {
            Some(item) => item,
            None => {
                trace!("Skipping orphaned favorite {}", record.id);
                continue;
            }
        };

        let slot = *index.entry(item.id.as_str()).or_insert_with(|| {
            ranked.push(RankedItem {
                item: item.clone(),
                favorite_count: 0,
            });
            ranked.len() - 1
        });
        ranked[slot].favorite_count += 1;
    }

    ranked
}

/// Stable sort by count, highest first, then keep `cap` entries
fn rank<T>(mut entries: Vec<T>, cap: usize, count: impl Fn(&T) -> usize) -> Vec<T> {
    entries.sort_by(|a, b| count(b).cmp(&count(a)));
    entries.truncate(cap);
    entries
}

/// Split counted items into the top food and top drinks
pub fn top_by_kind(ranked: &[RankedItem], categories: &[Category]) -> TopFavorites {
    let mut food = Vec::new();
    let mut drinks = Vec::new();

    for entry in ranked {
        match Kind::of(&entry.item.category_id, categories) {
            Some(Kind::Food) => food.push(entry.clone()),
            Some(Kind::Drink) => drinks.push(entry.clone()),
            None => trace!("{} is neither food nor drink", entry.item.id),
        }
    }

    TopFavorites {
        food: rank(food, TOP_PER_KIND, |e| e.favorite_count),
        drinks: rank(drinks, TOP_PER_KIND, |e| e.favorite_count),
    }
}

/// Label counted items with their category and keep the overall top ten
pub fn leaderboard(ranked: &[RankedItem], categories: &[Category]) -> Vec<LeaderboardEntry> {
    let entries: Vec<LeaderboardEntry> = ranked
        .iter()
        .map(|entry| {
            let category_name = categories
                .iter()
                .find(|c| c.id == entry.item.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
            LeaderboardEntry {
                ranked: entry.clone(),
                category_name,
            }
        })
        .collect();

    rank(entries, LEADERBOARD_SIZE, |e| e.ranked.favorite_count)
}

/// [`count_favorites`] followed by [`top_by_kind`]
pub fn top_favorites(records: &[FavoriteRecord], categories: &[Category]) -> TopFavorites {
    top_by_kind(&count_favorites(records), categories)
}

/// [`count_favorites`] followed by [`leaderboard`]
pub fn favorites_leaderboard(records: &[FavoriteRecord], categories: &[Category]) -> Vec<LeaderboardEntry> {
    leaderboard(&count_favorites(records), categories)
}
