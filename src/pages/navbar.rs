//! Navigation bar

use crate::auth::AuthContext;

/// Brand shown at the left of the bar
pub const BRAND: &str = "Bubble Time";

/// A navigation link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Link text
    pub label: String,
    /// Route the link points at
    pub path: &'static str,
}

/// The bar's content for one caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    /// Brand text
    pub brand: &'static str,
    /// Page links
    pub links: Vec<NavLink>,
    /// Login or logout link
    pub account: NavLink,
}

impl Navbar {
    /// Build the bar for whoever `ctx` says is browsing
    pub fn for_context(ctx: &AuthContext) -> Self {
        let link = |label: &str, path| NavLink {
            label: label.to_string(),
            path,
        };

        let account = match ctx {
            AuthContext::SignedIn(session) => match &session.email {
                Some(email) => link(&format!("Logout ({})", email), "/logout"),
                None => link("Logout", "/logout"),
            },
            AuthContext::Anonymous => link("Login", "/login"),
        };

        Navbar {
            brand: BRAND,
            links: vec![
                link("Home", "/"),
                link("Menu", "/menu"),
                link("Favorites", "/favorites"),
            ],
            account,
        }
    }
}
