use std::fmt::Display;
use tracing::{info, warn};

use super::data::{Product, ProductId};
use super::favorites::FavoritesStore;
use super::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(Product),
    /// Not found and transport failures look the same to the user
    NotFound,
}

/// View-model behind `/products/{id}`
#[derive(Debug, Clone)]
pub struct DetailViewModel {
    id: ProductId,
    state: DetailState,
    is_favorite: bool,
}

impl DetailViewModel {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            is_favorite: false,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Found(product) => Some(product),
            _ => None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Apply the result of `get_product` and read the favorite flag.
    pub fn finish_loading<S, E>(&mut self, result: Result<Product, E>, store: &FavoritesStore<S>)
    where
        S: KeyValueStore,
        E: Display,
    {
        match result {
            Ok(product) => {
                info!(id = product.id, "Product loaded");
                self.is_favorite = store.load().contains(product.id);
                self.state = DetailState::Found(product);
            }
            Err(e) => {
                warn!(id = self.id, "Product fetch failed: {}", e);
                self.is_favorite = false;
                self.state = DetailState::NotFound;
            }
        }
    }

    /// Read-modify-write toggle of the shown product.
    /// Does nothing until a product has loaded.
    pub fn toggle_favorite<S: KeyValueStore>(&mut self, store: &mut FavoritesStore<S>) {
        let Some(id) = self.product().map(|product| product.id) else {
            return;
        };

        self.is_favorite = match store.toggle(id) {
            Some(favorites) => favorites.contains(id),
            // Store unreadable: flip the flag locally, nothing was written
            None => !self.is_favorite,
        };
    }
}
