//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{codeforces::CodeforcesApi, config::CodeforcesConfig, db::CacheStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Cached entity store
    store: Arc<dyn CacheStore>,

    /// Codeforces API client
    api: Arc<dyn CodeforcesApi>,

    /// Standings rows requested per contest
    standings_count: u32,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        store: Arc<dyn CacheStore>,
        api: Arc<dyn CodeforcesApi>,
        config: &CodeforcesConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                api,
                standings_count: config.standings_count,
            }),
        }
    }

    pub fn store(&self) -> &dyn CacheStore {
        self.inner.store.as_ref()
    }

    pub fn api(&self) -> &dyn CodeforcesApi {
        self.inner.api.as_ref()
    }

    pub fn standings_count(&self) -> u32 {
        self.inner.standings_count
    }
}
