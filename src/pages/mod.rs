//! Page loaders and their view state.
//!
//! Each loader fetches what its page needs from a [`StorefrontSource`],
//! shapes it for display and folds failures into a [`ViewState`], so a
//! front end only has to render.
//!
//! [`StorefrontSource`]: crate::catalog::StorefrontSource

pub mod favorites;
pub mod home;
pub mod leaderboard;
pub mod menu;
pub mod navbar;

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix for prices
pub const CURRENCY: &str = "RM";

/// What a page shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// Fetches are in flight.
    ///
    /// Loaders never return this; it is what a front end shows until
    /// `load` resolves.
    #[default]
    Loading,

    /// A fetch failed; the message is safe to show to customers
    Failed(String),

    /// Everything loaded but there is nothing to show
    Empty(String),

    /// The page content
    Ready(T),
}

impl<T> ViewState<T> {
    /// The page content, if it is ready
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the page has content
    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }
}

/// Format a price for display, e.g. `RM 7.90`
pub fn price_label(price: Decimal) -> String {
    let mut price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(2);
    format!("{} {}", CURRENCY, price)
}
