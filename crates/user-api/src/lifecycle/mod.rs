//! # System Lifecycle
//!
//! [`UserSystem`] builds the configured [`UserStore`], starts whatever runs
//! behind it, and tears it down again.
//!
//! ## In-memory store
//!
//! The user actor is spawned with an empty context and reached through a
//! [`UserClient`](crate::clients::UserClient). Shutdown follows the channel
//! closure pattern:
//!
//! 1. **Drop every client** - the HTTP server drops its copies when it stops,
//!    [`UserSystem::shutdown`] drops the last one
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - the actor task is joined, bounded by a timeout
//!
//! ## SQLite store
//!
//! Nothing is spawned. Shutdown closes the connection pool.

use crate::config::{Settings, StoreKind};
use crate::store::{SqliteUserStore, StoreError, UserStore};
use crate::user_actor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// How long shutdown waits for the actor to drain its queue.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

enum Backend {
    Memory(JoinHandle<()>),
    Sqlite(SqliteUserStore),
}

/// The running user store and the resources behind it.
///
/// # Example
///
/// ```
/// use user_api::lifecycle::UserSystem;
/// use user_api::model::User;
/// use user_api::store::UserStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = UserSystem::in_memory(8);
///     let alice = system.store().insert(User::new("Alice")).await.map_err(|e| e.to_string())?;
///     assert_eq!(alice.id.0, 1);
///     system.shutdown().await
/// }
/// ```
pub struct UserSystem {
    store: Arc<dyn UserStore>,
    backend: Backend,
}

impl UserSystem {
    /// Spawns the user actor. Must be called inside a Tokio runtime.
    pub fn in_memory(buffer_size: usize) -> Self {
        let (actor, client) = user_actor::new(buffer_size);
        let handle = tokio::spawn(actor.run(()));
        info!(buffer_size, "In-memory user store started");

        Self {
            store: Arc::new(client),
            backend: Backend::Memory(handle),
        }
    }

    /// Opens (and if needed creates) the SQLite database at `url`.
    pub async fn sqlite(url: &str) -> Result<Self, StoreError> {
        let store = SqliteUserStore::connect(url).await?;
        Ok(Self {
            store: Arc::new(store.clone()),
            backend: Backend::Sqlite(store),
        })
    }

    pub async fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        match settings.store {
            StoreKind::Memory => Ok(Self::in_memory(usize::from(settings.actor_buffer))),
            StoreKind::Sqlite => Self::sqlite(&settings.database_url).await,
        }
    }

    /// A handle to the active store, cheap to clone into request handlers.
    pub fn store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.store)
    }

    /// Gracefully shuts down the store.
    ///
    /// For the in-memory store every other handle returned by
    /// [`store`](Self::store) must already be dropped, or the actor keeps
    /// running until the timeout.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user store...");
        drop(self.store);

        match self.backend {
            Backend::Memory(handle) => match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "User actor task failed");
                    return Err(format!("user actor task failed: {e}"));
                }
                Err(_) => {
                    error!("User actor did not stop in time");
                    return Err("user actor did not stop in time".to_string());
                }
            },
            Backend::Sqlite(store) => store.close().await,
        }

        info!("User store shut down");
        Ok(())
    }
}
