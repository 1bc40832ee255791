use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::state::route::Route;
use crate::state::storage::SqliteStorage;

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

const API_URL_VAR: &str = "PRODUCT_EXPLORER_API_URL";
const DATA_DIR_VAR: &str = "PRODUCT_EXPLORER_DATA_DIR";
const START_ROUTE_VAR: &str = "PRODUCT_EXPLORER_START_ROUTE";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API, without trailing slash
    pub api_base_url: String,
    /// Directory holding `storage.db`; `None` when no data directory exists
    pub data_dir: Option<PathBuf>,
    /// Page mounted at startup, e.g. `/products/3`
    pub start_route: Route,
}

impl Config {
    pub fn load() -> Self {
        let api_base_url = var(API_URL_VAR).unwrap_or_else(|| {
            info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        // A missing data directory is not fatal; favorites stay in memory
        let data_dir = match var(DATA_DIR_VAR) {
            Some(dir) => Some(PathBuf::from(dir)),
            None => SqliteStorage::default_data_dir()
                .map_err(|e| warn!("{DATA_DIR_VAR} not set and {e}"))
                .ok(),
        };

        let start_route = var(START_ROUTE_VAR)
            .map(|path| parse_route(&path))
            .unwrap_or_default();

        Self::new(&api_base_url, data_dir).with_start_route(start_route)
    }

    pub fn new(api_base_url: &str, data_dir: Option<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            data_dir,
            start_route: Route::Catalog,
        }
    }

    pub fn with_start_route(mut self, route: Route) -> Self {
        self.start_route = route;
        self
    }
}

/// Unknown paths fall back to the catalog
fn parse_route(path: &str) -> Route {
    Route::parse(path).unwrap_or_else(|| {
        warn!("{START_ROUTE_VAR}={path} is not a known route, starting at /");
        Route::Catalog
    })
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            warn!("{key} is empty, ignoring");
            None
        }
        Err(_) => None,
    }
}
