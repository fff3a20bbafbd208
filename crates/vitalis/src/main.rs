//! Vitalis
//!
//! A read-only FHIR R4 server over the `patients`, `blood_pressure` and
//! `heart_rate` tables.

use clap::Parser;
use tracing::info;
use vitalis_persistence::backends::is_postgres_url;
use vitalis_rest::{ServerConfig, create_app_with_config, init_logging};

#[cfg(feature = "sqlite")]
use vitalis_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Opens the SQLite backend described by the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    info!(
        database = %config.database_url,
        max_connections = config.max_connections,
        "Initializing SQLite backend"
    );

    let backend_config = SqliteBackendConfig {
        max_connections: config.max_connections,
        ..Default::default()
    };
    let backend = SqliteBackend::with_config(&config.database_url, backend_config)?;

    if config.init_schema {
        info!("Creating clinical tables if missing");
        backend.init_schema()?;
    }

    Ok(backend)
}

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let storage_backend = if is_postgres_url(&config.database_url) {
        "postgres"
    } else {
        "sqlite"
    };

    info!(
        port = config.port,
        host = %config.host,
        base_url = %config.base_url(),
        storage_backend,
        "Starting Vitalis"
    );

    if storage_backend == "postgres" {
        start_postgres(config).await
    } else {
        start_sqlite(config).await
    }
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when the sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p vitalis --features sqlite"
    )
}

/// Starts the server with the PostgreSQL backend.
#[cfg(feature = "postgres")]
async fn start_postgres(config: ServerConfig) -> anyhow::Result<()> {
    use vitalis_persistence::backends::postgres::{
        PostgresBackend, PostgresConfig, redact_password,
    };

    info!(
        url = %redact_password(&config.database_url),
        max_connections = config.max_connections,
        "Initializing PostgreSQL backend"
    );

    let backend_config = PostgresConfig {
        max_connections: config.max_connections as usize,
        ..PostgresConfig::from_url(config.database_url.clone())
    };
    let backend = PostgresBackend::new(backend_config).await?;

    if config.init_schema {
        info!("Creating clinical tables if missing");
        backend.init_schema().await?;
    }

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when the postgres feature is not enabled.
#[cfg(not(feature = "postgres"))]
async fn start_postgres(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The postgres backend requires the 'postgres' feature. \
         Build with: cargo build -p vitalis --features postgres"
    )
}

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("At least one database backend feature must be enabled");
