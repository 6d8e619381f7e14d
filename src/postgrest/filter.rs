//! Filter operations for PostgrestClient

/// Operator for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Eq,

    /// Like (case insensitive)
    ILike,
}

impl FilterOperator {
    /// Convert the operator to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::ILike => "ilike",
        }
    }

    /// Render `operator.value` as PostgREST expects it in the query string
    pub fn render(&self, value: &str) -> String {
        format!("{}.{}", self.as_str(), value)
    }
}
