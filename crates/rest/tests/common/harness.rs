//! REST API test harness.

#![allow(dead_code)]

use axum_test::TestServer;
use vitalis_persistence::backends::sqlite::SqliteBackend;
use vitalis_rest::{ServerConfig, create_app_with_config};

use super::fixtures::{seed, seeded_backend};

/// Base URL used by every test server.
pub const BASE_URL: &str = "http://fhir.test/r4";

/// Test configuration with a fixed base URL.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        base_url: format!("{}/", BASE_URL),
        ..ServerConfig::for_testing()
    }
}

/// Wraps a backend in a test server.
pub fn server_for(backend: SqliteBackend) -> TestServer {
    let app = create_app_with_config(backend, test_config());
    TestServer::new(app).expect("Failed to create test server")
}

/// A test server over the standard fixtures.
pub fn create_test_server() -> TestServer {
    server_for(seeded_backend())
}

/// A test server over the standard fixtures plus extra rows.
pub fn create_test_server_with(extra_sql: &str) -> TestServer {
    let backend = seeded_backend();
    seed(&backend, extra_sql);
    server_for(backend)
}

/// A test server whose database has no clinical tables.
pub fn create_schemaless_server() -> TestServer {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    server_for(backend)
}
