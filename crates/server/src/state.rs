//! Application state shared across handlers.

use std::sync::Arc;

use mongodb::Database;

use crate::config::AppConfig;
use crate::db::{FoodRepository, OrderRepository, UserRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the store handle. It is constructed once at process
/// start and passed into the router; nothing in the crate reaches for a
/// global store handle.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    db: Database,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AppConfig, db: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, db }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database handle.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Repository over the foods collection.
    #[must_use]
    pub fn foods(&self) -> FoodRepository<'_> {
        FoodRepository::new(&self.inner.db)
    }

    /// Repository over the users collection.
    #[must_use]
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.inner.db)
    }

    /// Repository over the orders collection.
    #[must_use]
    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.inner.db)
    }
}
