//! Application state for Axum web framework.
//!
//! Contains shared services that are accessible across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::{CarStore, Repositories};
use crate::services::Services;

/// Application state containing all shared services.
///
/// Cloning is cheap since the services hold their stores behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Creates a new AppState backed by the Postgres connection pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self::from_repositories(Repositories::new(pool))
    }

    /// Creates a new AppState on top of any car store.
    pub fn from_store(store: Arc<dyn CarStore>) -> Self {
        Self::from_repositories(Repositories::from_store(store))
    }

    fn from_repositories(repos: Repositories) -> Self {
        Self {
            services: Services::new(repos),
        }
    }
}
