/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog API and the UI layer.
use serde::{Deserialize, Serialize};

/// Stable identifier issued by the catalog source
pub type ProductId = u64;

/// Represents a single product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog ID
    pub id: ProductId,
    pub title: String,
    /// Non-negative price in the catalog's currency
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// One of the categories returned by `list_categories`
    pub category: String,
    /// URI of the product image
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregated customer rating
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    /// Price formatted for display, e.g. "$109.95"
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating, Rating { rate: 3.9, count: 120 });
        assert_eq!(product.display_price(), "$109.95");
    }

    #[test]
    fn test_missing_rating_defaults() {
        let json = r#"{"id": 7, "title": "Plain", "price": 3, "category": "misc"}"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.rating, Rating::default());
        assert_eq!(product.display_price(), "$3.00");
    }
}
