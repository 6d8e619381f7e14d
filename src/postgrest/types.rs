//! Types for the PostgrestClient

/// Options for returning data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOption {
    /// Return representation (the data)
    Representation,

    /// Return minimal data
    Minimal,
}

impl ReturnOption {
    /// Convert the option to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnOption::Representation => "representation",
            ReturnOption::Minimal => "minimal",
        }
    }

    /// The value of the `Prefer` header requesting this option
    pub fn prefer_header(&self) -> String {
        format!("return={}", self.as_str())
    }
}

/// Sort direction for ordered selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Ascending order
    Asc,

    /// Descending order
    Desc,
}

impl Order {
    /// Convert the direction to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}
