use iced::{Element, Task, Theme};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod config;
mod state;
mod ui;

use api::{ApiError, CatalogClient, HttpCatalogClient};
use config::Config;
use state::catalog::{fetch_catalog, CatalogData, CatalogViewModel};
use state::data::{Product, ProductId};
use state::detail::DetailViewModel;
use state::favorites::FavoritesStore;
use state::filter::CategoryFilter;
use state::route::Route;
use state::storage::{KeyValueStore, MemoryStorage, SqliteStorage, StorageError};

type Storage = Box<dyn KeyValueStore>;

/// Which page is mounted
enum Screen {
    Catalog,
    Detail(DetailViewModel),
}

/// Main application state
struct ProductExplorer {
    client: Arc<dyn CatalogClient>,
    /// Shared by both pages; each reads it when mounted
    favorites: FavoritesStore<Storage>,
    catalog: CatalogViewModel,
    screen: Screen,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Both catalog fetches finished (or one failed)
    CatalogLoaded(Result<CatalogData, Arc<ApiError>>),
    /// User asked to retry after a failed load
    Reload,
    SearchChanged(String),
    CategorySelected(CategoryFilter),
    ToggleShowOnlyFavorites,
    ClearFilters,
    /// Heart clicked on a catalog card
    ToggleFavorite(ProductId),
    Navigate(Route),
    ProductLoaded(ProductId, Result<Product, Arc<ApiError>>),
    /// Heart clicked on the detail page
    ToggleDetailFavorite,
    Back,
}

impl ProductExplorer {
    /// Start loading the catalog and mount `start`
    fn new(
        client: Arc<dyn CatalogClient>,
        storage: Storage,
        start: Route,
    ) -> (Self, Task<Message>) {
        let mut app = ProductExplorer {
            client,
            favorites: FavoritesStore::new(storage),
            catalog: CatalogViewModel::new(),
            screen: Screen::Catalog,
        };

        // The catalog always loads, even when starting on a product page,
        // so "back" has something to show
        let load = app.load_catalog();
        let task = match start {
            Route::Catalog => load,
            route => Task::batch([load, app.navigate(route)]),
        };

        (app, task)
    }

    fn route(&self) -> Route {
        match &self.screen {
            Screen::Catalog => Route::Catalog,
            Screen::Detail(vm) => Route::Product(vm.id()),
        }
    }

    fn load_catalog(&self) -> Task<Message> {
        let client = Arc::clone(&self.client);
        Task::perform(
            async move { fetch_catalog(client.as_ref()).await.map_err(Arc::new) },
            Message::CatalogLoaded,
        )
    }

    fn navigate(&mut self, route: Route) -> Task<Message> {
        info!(%route, "Navigating");

        match route {
            Route::Catalog => {
                self.screen = Screen::Catalog;
                // Re-mount: pick up favorites changed on the detail page
                self.catalog.refresh_favorites(&self.favorites);
                Task::none()
            }
            Route::Product(id) => {
                // Fresh view-model per visit; it starts in Loading
                self.screen = Screen::Detail(DetailViewModel::new(id));

                let client = Arc::clone(&self.client);
                Task::perform(
                    async move { client.get_product(id).await.map_err(Arc::new) },
                    move |result| Message::ProductLoaded(id, result),
                )
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(result) => {
                self.catalog.finish_loading(result, &self.favorites);
            }
            Message::Reload => {
                // Full reload: drop filters and data, fetch both lists again
                self.catalog.reload();
                return self.load_catalog();
            }
            Message::SearchChanged(query) => self.catalog.set_search_query(query),
            Message::CategorySelected(category) => self.catalog.select_category(category),
            Message::ToggleShowOnlyFavorites => self.catalog.toggle_show_only_favorites(),
            Message::ClearFilters => self.catalog.clear_filters(),
            Message::ToggleFavorite(id) => {
                // Synchronous for the UI; the store write happens inline
                self.catalog.toggle_favorite(id, &mut self.favorites);
            }
            Message::Navigate(route) => return self.navigate(route),
            // Only the mounted detail page may consume a product result
            Message::ProductLoaded(id, result) => match &mut self.screen {
                Screen::Detail(vm) if vm.id() == id => {
                    vm.finish_loading(result, &self.favorites);
                }
                _ => debug!(id, "Dropping product result for unmounted page"),
            },
            Message::ToggleDetailFavorite => {
                if let Screen::Detail(vm) = &mut self.screen {
                    vm.toggle_favorite(&mut self.favorites);
                }
            }
            Message::Back => return self.navigate(Route::Catalog),
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.screen {
            Screen::Catalog => ui::catalog::view(&self.catalog),
            Screen::Detail(vm) => ui::detail::view(vm),
        }
    }

    fn title(&self) -> String {
        match self.route() {
            Route::Catalog => "Product Explorer".to_string(),
            route => format!("Product Explorer · {route}"),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Open the persistent store, or fall back to memory so the app still runs.
fn open_storage(data_dir: Option<&Path>) -> Storage {
    let opened = match data_dir {
        Some(dir) => SqliteStorage::open(dir),
        None => Err(StorageError::NoDataDir),
    };

    match opened {
        Ok(storage) => {
            debug!(path = %storage.path().display(), "Favorites storage ready");
            Box::new(storage)
        }
        Err(e) => {
            warn!("Favorites will not persist, storage unavailable: {}", e);
            Box::new(MemoryStorage::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    info!(api = %config.api_base_url, start = %config.start_route, "Starting Product Explorer");

    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::new(&config.api_base_url)?);
    let storage = open_storage(config.data_dir.as_deref());
    let start = config.start_route;

    iced::application(ProductExplorer::title, ProductExplorer::update, ProductExplorer::view)
        .theme(ProductExplorer::theme)
        .centered()
        .run_with(move || ProductExplorer::new(client, storage, start))?;

    Ok(())
}
