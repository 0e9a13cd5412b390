//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::PostRepository;
use scribe_core::RepoError;
use scribe_core::ports::PostStore;
use scribe_infra::InMemoryPostStore;

use crate::config::StoreConfig;

#[cfg(feature = "postgres")]
use scribe_infra::PostgresPostStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostRepository,
}

impl AppState {
    /// State backed by an arbitrary store.
    pub fn with_store(store: Arc<dyn PostStore>) -> Self {
        Self {
            posts: PostRepository::new(store),
        }
    }

    /// Fresh, empty in-memory state.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryPostStore::new()))
    }

    /// Build the application state from configuration.
    ///
    /// Every failure is returned to the caller: a missing database
    /// configuration or an unreachable database never degrades to the
    /// in-memory store.
    pub async fn new(store: &StoreConfig) -> Result<Self, RepoError> {
        let state = match store {
            StoreConfig::InMemory => {
                tracing::warn!("Using the in-memory post store. Posts are lost on restart.");
                Self::in_memory()
            }
            StoreConfig::Unconfigured => {
                return Err(RepoError::Connection(
                    "DATABASE_URL is not set (set POST_STORE=memory to run without a database)"
                        .to_string(),
                ));
            }
            #[cfg(feature = "postgres")]
            StoreConfig::Postgres(config) => {
                let conn = scribe_infra::database::connect(config).await?;
                Self::with_store(Arc::new(PostgresPostStore::new(conn)))
            }
            #[cfg(not(feature = "postgres"))]
            StoreConfig::Postgres(_) => {
                return Err(RepoError::Connection(
                    "DATABASE_URL is set but this build has no postgres support".to_string(),
                ));
            }
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
