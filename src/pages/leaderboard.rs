//! The leaderboard page: one top ten across all categories

use super::favorites::{fetch_inputs, FavoriteCard, NO_FAVORITES};
use super::ViewState;
use crate::catalog::StorefrontSource;
use crate::favorites::favorites_leaderboard;
use crate::storage::BucketClient;

/// A leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// The ranked item
    pub card: FavoriteCard,
    /// Category name, or "Unknown Category"
    pub category_name: String,
}

/// Load the leaderboard
pub async fn load<S>(source: &S, images: &BucketClient<'_>) -> ViewState<Vec<LeaderboardRow>>
where
    S: StorefrontSource + ?Sized,
{
    let (categories, favorites) = match fetch_inputs(source).await {
        Ok(inputs) => inputs,
        Err(message) => return ViewState::Failed(message),
    };

    let rows: Vec<LeaderboardRow> = favorites_leaderboard(&favorites, &categories)
        .iter()
        .enumerate()
        .map(|(n, entry)| LeaderboardRow {
            card: FavoriteCard::new(n + 1, &entry.ranked, images),
            category_name: entry.category_name.clone(),
        })
        .collect();

    if rows.is_empty() {
        return ViewState::Empty(NO_FAVORITES.to_string());
    }
    ViewState::Ready(rows)
}
