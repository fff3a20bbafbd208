//! Server configuration for the FHIR REST API.
//!
//! Configuration comes from command line arguments, environment variables,
//! or code.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VITALIS_SERVER_PORT` | 8080 | Server port |
//! | `VITALIS_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `VITALIS_LOG_LEVEL` | info | Log level |
//! | `VITALIS_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `VITALIS_ENABLE_CORS` | true | Enable CORS |
//! | `VITALIS_CORS_ORIGINS` | * | Allowed origins |
//! | `VITALIS_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `VITALIS_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `VITALIS_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `VITALIS_DATABASE_URL` | clinical.db | SQLite path, `:memory:`, or a `postgres://` URL |
//! | `VITALIS_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `VITALIS_INIT_SCHEMA` | false | Create the clinical tables if missing |
//!
//! # Example
//!
//! ```rust
//! use vitalis_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use clap::Parser;
use url::Url;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Server configuration for the FHIR REST API.
#[derive(Debug, Clone, Parser)]
#[command(name = "vitalis")]
#[command(about = "Read-only FHIR facade over clinical SQL tables")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "VITALIS_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "VITALIS_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "VITALIS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "VITALIS_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "VITALIS_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "VITALIS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "VITALIS_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "VITALIS_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in Bundle links and fullUrl).
    #[arg(long, env = "VITALIS_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database path, `:memory:`, or a `postgres://` connection URL.
    #[arg(long, env = "VITALIS_DATABASE_URL", default_value = "clinical.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "VITALIS_MAX_CONNECTIONS", default_value = "10")]
    pub max_connections: u32,

    /// Create the clinical tables at startup if they do not exist.
    #[arg(long, env = "VITALIS_INIT_SCHEMA", default_value = "false")]
    pub init_schema: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: "clinical.db".to_string(),
            max_connections: 10,
            init_schema: false,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validates the configuration, reporting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.max_connections == 0 {
            errors.push("Max connections cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level '{}' must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "Base URL scheme must be http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("Base URL '{}' is invalid: {}", self.base_url, e)),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory database, ephemeral port 0 and a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: ":memory:".to_string(),
            max_connections: 4,
            init_schema: true,
            ..Self::default()
        }
    }
}
