use std::fmt;

use super::data::ProductId;

/// Navigable locations of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`
    #[default]
    Catalog,
    /// `/products/{id}`
    Product(ProductId),
}

impl Route {
    /// Parse a path. Unknown paths and non-numeric ids yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Catalog);
        }

        let id = trimmed.strip_prefix("/products/")?;
        id.parse().ok().map(Route::Product)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => write!(f, "/"),
            Route::Product(id) => write!(f, "/products/{id}"),
        }
    }
}
