use super::data::Product;
use super::favorites::FavoriteSet;

/// Sentinel used by routes and chips for "no category restriction"
pub const ALL_CATEGORIES: &str = "all";

/// Which category the grid is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(selected) => selected == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }
}

/// Ephemeral filter predicates of the catalog view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_query: String,
    pub selected_category: CategoryFilter,
    pub show_only_favorites: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any predicate deviates from the defaults
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `product` passes all three predicates.
    /// `query` must already be lowercased.
    fn admits(&self, product: &Product, query: &str, favorites: &FavoriteSet) -> bool {
        product.title.to_lowercase().contains(query)
            && self.selected_category.matches(&product.category)
            && (!self.show_only_favorites || favorites.contains(product.id))
    }
}

/// Project the filter state onto `products`.
///
/// Recomputed from scratch on every change; keeps the fetched order.
pub fn visible_products<'a>(
    products: &'a [Product],
    filter: &FilterState,
    favorites: &FavoriteSet,
) -> Vec<&'a Product> {
    let query = filter.search_query.to_lowercase();

    products
        .iter()
        .filter(|product| filter.admits(product, &query, favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Rating;

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 10.0,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    fn shop() -> Vec<Product> {
        vec![
            product(1, "Red Shoe", "shoes"),
            product(2, "Blue Hat", "hats"),
            product(3, "Running SHOE Pro", "shoes"),
            product(4, "Sun Hat", "hats"),
            product(5, "Shoelace", "accessories"),
        ]
    }

    fn ids(visible: &[&Product]) -> Vec<u64> {
        visible.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_search_scenario() {
        let products = vec![product(1, "Red Shoe", "shoes"), product(2, "Blue Hat", "hats")];
        let filter = FilterState {
            search_query: "shoe".to_string(),
            ..FilterState::default()
        };

        let visible = visible_products(&products, &filter, &FavoriteSet::new());

        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn test_empty_query_matches_all_in_order() {
        let products = shop();

        let visible = visible_products(&products, &FilterState::new(), &FavoriteSet::new());

        assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_subsequence() {
        let products = shop();

        for query in ["shoe", "SHOE", "sHoE", "hat", "e", "zzz"] {
            let filter = FilterState {
                search_query: query.to_string(),
                ..FilterState::default()
            };
            let visible = visible_products(&products, &filter, &FavoriteSet::new());

            let expected: Vec<u64> = products
                .iter()
                .filter(|p| p.title.to_lowercase().contains(&query.to_lowercase()))
                .map(|p| p.id)
                .collect();
            assert_eq!(ids(&visible), expected, "query {query:?}");

            // ids are ascending in the source list, so order is preserved iff sorted
            assert!(ids(&visible).windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_category_filter() {
        let products = shop();
        let filter = FilterState {
            selected_category: CategoryFilter::from("hats"),
            ..FilterState::default()
        };

        let visible = visible_products(&products, &filter, &FavoriteSet::new());

        assert_eq!(ids(&visible), vec![2, 4]);
    }

    #[test]
    fn test_all_sentinel_parses_to_all() {
        assert_eq!(CategoryFilter::from(ALL_CATEGORIES), CategoryFilter::All);
        assert!(CategoryFilter::All.matches("anything"));
    }

    #[test]
    fn test_favorites_only_with_empty_set_is_empty() {
        let products = shop();

        for category in [CategoryFilter::All, CategoryFilter::from("shoes")] {
            for query in ["", "shoe"] {
                let filter = FilterState {
                    search_query: query.to_string(),
                    selected_category: category.clone(),
                    show_only_favorites: true,
                };
                assert!(visible_products(&products, &filter, &FavoriteSet::new()).is_empty());
            }
        }
    }

    #[test]
    fn test_all_predicates_combine() {
        let products = shop();
        let favorites: FavoriteSet = [3, 4, 5].into_iter().collect();
        let filter = FilterState {
            search_query: "shoe".to_string(),
            selected_category: CategoryFilter::from("shoes"),
            show_only_favorites: true,
        };

        let visible = visible_products(&products, &filter, &favorites);

        assert_eq!(ids(&visible), vec![3]);
    }

    #[test]
    fn test_reset_restores_unfiltered_view() {
        let products = shop();
        let mut filter = FilterState {
            search_query: "hat".to_string(),
            selected_category: CategoryFilter::from("hats"),
            show_only_favorites: true,
        };
        assert!(filter.is_active());

        filter.reset();

        assert!(!filter.is_active());
        assert_eq!(filter.selected_category, CategoryFilter::All);
        let visible = visible_products(&products, &filter, &FavoriteSet::new());
        assert_eq!(visible.len(), products.len());
    }
}
