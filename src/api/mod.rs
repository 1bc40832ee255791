/// Remote catalog access
///
/// This module handles:
/// - The `CatalogClient` seam used by the view-models
/// - The reqwest-backed HTTP implementation
/// - Transport and decode errors

pub mod client;
pub mod error;

pub use client::{CatalogClient, HttpCatalogClient};
pub use error::ApiError;
