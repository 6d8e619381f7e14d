//! The landing page

/// A titled block of copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading
    pub heading: &'static str,
    /// Body text
    pub body: &'static str,
}

/// Landing page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    /// Page title
    pub title: &'static str,
    /// Line under the title
    pub tagline: &'static str,
    /// Content blocks, in display order
    pub sections: Vec<Section>,
}

/// The landing page. It is static and needs no fetches.
pub fn page() -> HomePage {
    HomePage {
        title: "Welcome to Bubble Time",
        tagline: "Your cozy destination for premium bubble tea and refreshing beverages",
        sections: vec![
            Section {
                heading: "About Us",
                body: "Established in 2023, Bubble Time brings you authentic Taiwanese \
                       bubble tea with a modern twist. We carefully select our \
                       ingredients to ensure the best quality drinks.",
            },
            Section {
                heading: "Our Specialties",
                body: "From classic milk teas to creative fruit teas, we offer a wide \
                       range of customizable drinks. Try our signature Brown Sugar Pearl \
                       Milk Tea or refreshing Fruit Tea Series.",
            },
            Section {
                heading: "Visit Us",
                body: "Open daily from 10 AM to 10 PM. Located in the heart of the \
                       city, we offer a comfortable space to enjoy your favorite \
                       drinks with friends and family.",
            },
        ],
    }
}
