//! SQLite backend implementation.

use std::fmt::Debug;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BackendError, StorageError, StorageResult};

use super::schema;

pub(crate) const BACKEND_NAME: &str = "sqlite";

/// Distinguishes in-memory databases created by the same process.
static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SQLite backend serving clinical lookups from a connection pool.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection checkout timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for file databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    ///
    /// All pooled connections share one private in-memory database, which
    /// lives as long as the backend.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(":memory:", SqliteBackendConfig::default())
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Creates a backend with custom configuration.
    ///
    /// `":memory:"` selects an in-memory database.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StorageResult<Self> {
        let is_memory = path.as_ref().to_string_lossy() == ":memory:";

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms as u64);
        let manager = if is_memory {
            let n = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
            SqliteConnectionManager::file(format!(
                "file:vitalis-mem-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                n
            ))
        } else {
            SqliteConnectionManager::file(path.as_ref())
        };
        let manager = manager.with_init(move |conn| conn.busy_timeout(busy_timeout));

        let mut builder = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_connections.max(1)))
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        if is_memory {
            // The shared in-memory database is dropped with its last connection.
            builder = builder.idle_timeout(None).max_lifetime(None);
        }

        let pool = builder
            .build(manager)
            .map_err(|e| StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            }))?;

        let backend = Self {
            pool,
            config,
            is_memory,
        };

        backend.configure_database()?;

        info!(
            path = %path.as_ref().display(),
            max_connections = backend.config.max_connections,
            "Opened SQLite backend"
        );

        Ok(backend)
    }

    /// Creates the clinical tables if they do not exist.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Checks a connection out of the pool.
    ///
    /// The connection returns to the pool when dropped. Lookups never write;
    /// this is also how tests and tooling load data.
    ///
    /// A checkout that times out while every connection is in use reports
    /// [`BackendError::PoolExhausted`]; any other failure is a connection
    /// failure.
    pub fn get_connection(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            let state = self.pool.state();
            if state.idle_connections == 0 && state.connections >= self.pool.max_size() {
                StorageError::Backend(BackendError::PoolExhausted {
                    backend_name: BACKEND_NAME.to_string(),
                })
            } else {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: BACKEND_NAME.to_string(),
                    message: e.to_string(),
                })
            }
        })
    }

    /// Applies database-wide settings.
    fn configure_database(&self) -> StorageResult<()> {
        if self.config.enable_wal && !self.is_memory {
            let conn = self.get_connection()?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")
                .map_err(|e| {
                    StorageError::Backend(BackendError::Internal {
                        backend_name: BACKEND_NAME.to_string(),
                        message: format!("Failed to enable WAL mode: {}", e),
                        source: Some(Box::new(e)),
                    })
                })?;
            debug!("Enabled WAL journal mode");
        }
        Ok(())
    }

    /// Runs `SELECT 1` on a pooled connection.
    pub(crate) fn ping(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| BackendError::Internal {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Health check failed: {}", e),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }
}
