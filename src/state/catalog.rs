/// Catalog view-model
///
/// Owns the fetched products and categories, the filter predicates and
/// the favorites as last read from storage. Everything shown in the grid
/// is derived from these through `filter::visible_products`.
use std::fmt::Display;
use tracing::{info, warn};

use super::data::{Product, ProductId};
use super::favorites::{FavoriteSet, FavoritesStore};
use super::filter::{visible_products, CategoryFilter, FilterState};
use super::storage::KeyValueStore;
use crate::api::{ApiError, CatalogClient};

/// Shown instead of the grid when the initial fetch fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Both lists the catalog page needs before it can render
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
}

/// Fetch products and categories concurrently.
/// Either failure fails the whole load.
pub async fn fetch_catalog(client: &dyn CatalogClient) -> Result<CatalogData, ApiError> {
    let (products, categories) =
        tokio::try_join!(client.list_products(), client.list_categories())?;

    Ok(CatalogData {
        products,
        categories,
    })
}

#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Loaded(CatalogData),
    /// Terminal until a reload; holds the user-facing message
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CatalogViewModel {
    state: CatalogState,
    filter: FilterState,
    favorites: FavoriteSet,
}

impl Default for CatalogViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogViewModel {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
            filter: FilterState::new(),
            favorites: FavoriteSet::new(),
        }
    }

    /// Apply the outcome of `fetch_catalog`. On success the favorites are
    /// read from `store`.
    pub fn finish_loading<S, E>(&mut self, result: Result<CatalogData, E>, store: &FavoritesStore<S>)
    where
        S: KeyValueStore,
        E: Display,
    {
        match result {
            Ok(data) => {
                info!(
                    products = data.products.len(),
                    categories = data.categories.len(),
                    "Catalog loaded"
                );
                self.favorites = store.load();
                self.state = CatalogState::Loaded(data);
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                self.state = CatalogState::Failed(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Full reload: forget everything and go back to loading.
    pub fn reload(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn products(&self) -> &[Product] {
        match &self.state {
            CatalogState::Loaded(data) => &data.products,
            _ => &[],
        }
    }

    pub fn categories(&self) -> &[String] {
        match &self.state {
            CatalogState::Loaded(data) => &data.categories,
            _ => &[],
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// The products currently passing every filter, in fetched order
    pub fn visible(&self) -> Vec<&Product> {
        visible_products(self.products(), &self.filter, &self.favorites)
    }

    pub fn set_search_query(&mut self, query: String) {
        self.filter.search_query = query;
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.filter.selected_category = category;
    }

    pub fn set_show_only_favorites(&mut self, value: bool) {
        self.filter.show_only_favorites = value;
    }

    pub fn toggle_show_only_favorites(&mut self) {
        self.filter.show_only_favorites = !self.filter.show_only_favorites;
    }

    /// Reset the filter predicates. The favorites set is left alone.
    pub fn clear_filters(&mut self) {
        self.filter.reset();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active()
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.contains(id)
    }

    /// Flip `id` in the favorites and persist the full set.
    /// Returns whether `id` is a favorite afterwards.
    ///
    /// The in-memory set is the source of truth here: a failed write is
    /// logged and the toggle still shows.
    pub fn toggle_favorite<S: KeyValueStore>(
        &mut self,
        id: ProductId,
        store: &mut FavoritesStore<S>,
    ) -> bool {
        let now_favorite = self.favorites.toggle(id);

        if let Err(e) = store.save(&self.favorites) {
            warn!(id, "Failed to persist favorites: {}", e);
        }
        now_favorite
    }

    /// Re-read favorites, e.g. when the view is shown again.
    pub fn refresh_favorites<S: KeyValueStore>(&mut self, store: &FavoritesStore<S>) {
        self.favorites = store.load();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Rating;
    use crate::state::favorites::FAVORITES_KEY;
    use crate::state::storage::testing::ReadOnlyStorage;
    use crate::state::storage::MemoryStorage;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 1.0,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Client whose list calls succeed or fail on demand
    struct ScriptedClient {
        products_fail: bool,
        categories_fail: bool,
    }

    #[async_trait]
    impl CatalogClient for ScriptedClient {
        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            if self.products_fail {
                return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(vec![
                product(1, "Red Shoe", "shoes"),
                product(2, "Blue Hat", "hats"),
            ])
        }

        async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
            if self.categories_fail {
                return Err(ApiError::Status(StatusCode::BAD_GATEWAY));
            }
            Ok(vec!["shoes".to_string(), "hats".to_string()])
        }

        async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
            Err(ApiError::NotFound(id.to_string()))
        }
    }

    fn ok_client() -> ScriptedClient {
        ScriptedClient {
            products_fail: false,
            categories_fail: false,
        }
    }

    async fn loaded(store: &FavoritesStore<MemoryStorage>) -> CatalogViewModel {
        let mut vm = CatalogViewModel::new();
        vm.finish_loading(fetch_catalog(&ok_client()).await, store);
        vm
    }

    #[tokio::test]
    async fn test_load_merges_favorites() {
        let store = FavoritesStore::new(MemoryStorage::with_item(FAVORITES_KEY, "[2]"));
        let mut vm = CatalogViewModel::new();
        assert!(vm.is_loading());

        vm.finish_loading(fetch_catalog(&ok_client()).await, &store);

        assert!(!vm.is_loading());
        assert_eq!(vm.products().len(), 2);
        assert_eq!(vm.categories(), &["shoes".to_string(), "hats".to_string()]);
        assert!(vm.is_favorite(2));
        assert!(!vm.is_favorite(1));
    }

    #[tokio::test]
    async fn test_malformed_favorites_do_not_fail_load() {
        let store = FavoritesStore::new(MemoryStorage::with_item(FAVORITES_KEY, "not-json"));

        let vm = loaded(&store).await;

        assert!(vm.error().is_none());
        assert!(vm.favorites().is_empty());
        assert_eq!(vm.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_any_fetch_failure_fails_whole_load() {
        let store = FavoritesStore::new(MemoryStorage::new());

        for (products_fail, categories_fail) in [(true, false), (false, true), (true, true)] {
            let client = ScriptedClient {
                products_fail,
                categories_fail,
            };
            let mut vm = CatalogViewModel::new();

            vm.finish_loading(fetch_catalog(&client).await, &store);

            assert_eq!(vm.error(), Some(LOAD_ERROR_MESSAGE));
            assert!(vm.products().is_empty());
            assert!(vm.categories().is_empty());
            assert!(vm.visible().is_empty());
        }
    }

    #[tokio::test]
    async fn test_reload_returns_to_loading() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let mut vm = CatalogViewModel::new();
        vm.finish_loading(Err("offline"), &store);
        assert!(vm.error().is_some());

        vm.reload();
        assert!(vm.is_loading());

        vm.finish_loading(fetch_catalog(&ok_client()).await, &store);
        assert_eq!(vm.products().len(), 2);
    }

    #[tokio::test]
    async fn test_search_and_category() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let mut vm = loaded(&store).await;

        vm.set_search_query("SHOE".to_string());
        assert_eq!(vm.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);

        vm.set_search_query(String::new());
        vm.select_category(CategoryFilter::from("hats"));
        assert_eq!(vm.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn test_toggle_favorite_persists_and_filters() {
        let mut store = FavoritesStore::new(MemoryStorage::with_item(FAVORITES_KEY, "[1,2]"));
        let mut vm = loaded(&store).await;

        assert!(!vm.toggle_favorite(2, &mut store));
        assert_eq!(
            store.storage().get_item(FAVORITES_KEY).unwrap().as_deref(),
            Some("[1]")
        );

        vm.toggle_show_only_favorites();
        assert_eq!(vm.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);

        assert!(vm.toggle_favorite(2, &mut store));
        assert_eq!(vm.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_toggles_survive_failed_writes() {
        let loaded_from = FavoritesStore::new(MemoryStorage::with_item(FAVORITES_KEY, "[5]"));
        let mut vm = loaded(&loaded_from).await;
        let mut store = FavoritesStore::new(ReadOnlyStorage::new(MemoryStorage::with_item(
            FAVORITES_KEY,
            "[5]",
        )));

        assert!(vm.toggle_favorite(1, &mut store));
        assert!(vm.toggle_favorite(2, &mut store));

        assert!(vm.is_favorite(1));
        assert!(vm.is_favorite(2));
        assert!(vm.is_favorite(5));

        vm.set_show_only_favorites(true);
        assert_eq!(vm.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);

        // nothing reached the store
        let stored = store.storage().inner.get_item(FAVORITES_KEY).unwrap();
        assert_eq!(stored.as_deref(), Some("[5]"));
    }

    #[tokio::test]
    async fn test_favorites_only_with_no_favorites_is_empty() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let mut vm = loaded(&store).await;

        vm.set_show_only_favorites(true);

        assert!(vm.visible().is_empty());
    }

    #[tokio::test]
    async fn test_clear_filters_keeps_favorites() {
        let mut store = FavoritesStore::new(MemoryStorage::new());
        let mut vm = loaded(&store).await;
        vm.toggle_favorite(1, &mut store);

        vm.set_search_query("hat".to_string());
        vm.select_category(CategoryFilter::from("shoes"));
        vm.set_show_only_favorites(true);
        assert!(vm.has_active_filters());
        assert!(vm.visible().is_empty());

        vm.clear_filters();

        assert!(!vm.has_active_filters());
        assert_eq!(vm.filter(), &FilterState::default());
        assert_eq!(vm.visible().len(), 2);
        assert!(vm.is_favorite(1));
    }

    #[tokio::test]
    async fn test_refresh_favorites_picks_up_external_change() {
        let mut store = FavoritesStore::new(MemoryStorage::new());
        let mut vm = loaded(&store).await;

        // another view writes directly through the store
        store.toggle(2);
        assert!(!vm.is_favorite(2));

        vm.refresh_favorites(&store);
        assert!(vm.is_favorite(2));
    }
}
