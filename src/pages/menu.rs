//! The menu page: every item, grouped by category

use log::error;
use std::collections::HashMap;

use super::{price_label, ViewState};
use crate::catalog::{MenuItem, StorefrontSource};
use crate::storage::BucketClient;

/// Heading for items whose category is missing from the category list
pub const OTHER_SECTION: &str = "Other";

/// One item card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCard {
    /// Item ID, for favoriting
    pub id: String,
    /// Item name
    pub name: String,
    /// Formatted price
    pub price_label: String,
    /// Public photo URL
    pub image_url: Option<String>,
}

/// A category heading and its items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    /// Category name
    pub category: String,
    /// Items, in the order the store returned them
    pub items: Vec<MenuCard>,
}

/// Menu page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage {
    /// Sections in category order
    pub sections: Vec<MenuSection>,
}

fn card(item: &MenuItem, images: &BucketClient<'_>) -> MenuCard {
    MenuCard {
        id: item.id.clone(),
        name: item.name.clone(),
        price_label: price_label(item.price),
        image_url: images.image_url(item.image_url.as_deref()),
    }
}

/// Load the menu
pub async fn load<S>(source: &S, images: &BucketClient<'_>) -> ViewState<MenuPage>
where
    S: StorefrontSource + ?Sized,
{
    let categories = match source.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            error!("Error fetching categories: {}", e);
            return ViewState::Failed("Failed to load menu".to_string());
        }
    };
    let items = match source.menu_items().await {
        Ok(items) => items,
        Err(e) => {
            error!("Error fetching menu items: {}", e);
            return ViewState::Failed("Failed to load menu".to_string());
        }
    };

    if items.is_empty() {
        return ViewState::Empty("The menu is empty".to_string());
    }

    let mut by_category: HashMap<&str, Vec<MenuCard>> = HashMap::new();
    for item in &items {
        by_category
            .entry(item.category_id.as_str())
            .or_default()
            .push(card(item, images));
    }

    let mut sections: Vec<MenuSection> = categories
        .iter()
        .map(|c| MenuSection {
            category: c.name.clone(),
            items: by_category.remove(c.id.as_str()).unwrap_or_default(),
        })
        .collect();

    // Whatever is left references a category we were not given.
    let other: Vec<MenuCard> = items
        .iter()
        .filter(|i| by_category.contains_key(i.category_id.as_str()))
        .map(|i| card(i, images))
        .collect();
    if !other.is_empty() {
        sections.push(MenuSection {
            category: OTHER_SECTION.to_string(),
            items: other,
        });
    }

    ViewState::Ready(MenuPage { sections })
}
