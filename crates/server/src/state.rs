//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::llm::ChatClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    model: Option<ChatClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The chat client is only constructed when the configuration carries a
    /// model section; without one, catalog ingestion is disabled and every
    /// store creation reports zero extracted products.
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        let model = config.model.as_ref().map(ChatClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                model,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the chat-completion client, if configured.
    #[must_use]
    pub fn model(&self) -> Option<&ChatClient> {
        self.inner.model.as_ref()
    }
}
