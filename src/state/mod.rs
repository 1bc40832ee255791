/// State management module
///
/// This module handles all application state, including:
/// - Catalog data structures (data.rs)
/// - The local key-value store (storage.rs)
/// - Persisted favorites (favorites.rs)
/// - Filter predicates and the visible-list projection (filter.rs)
/// - The catalog and detail view-models (catalog.rs, detail.rs)
/// - Navigation routes (route.rs)

pub mod catalog;
pub mod data;
pub mod detail;
pub mod favorites;
pub mod filter;
pub mod route;
pub mod storage;
