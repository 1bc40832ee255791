use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use crate::state::data::{Product, ProductId};

/// Read-only access to the catalog source.
///
/// The view-models only see this trait; tests script it.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;
}

/// CatalogClient over a fakestoreapi-style REST API
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("product-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("products").await
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("products/categories").await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("products/{id}"));
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound(id.to_string())),
            status if !status.is_success() => return Err(ApiError::Status(status)),
            _ => {}
        }

        let body = response.text().await?;
        parse_product_body(id, &body)
    }
}

/// The catalog answers unknown ids with 200 and an empty or `null` body.
fn parse_product_body(id: ProductId, body: &str) -> Result<Product, ApiError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Err(ApiError::NotFound(id.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}
