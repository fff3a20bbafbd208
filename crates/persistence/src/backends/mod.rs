//! Database backend implementations.
//!
//! Each backend is gated behind a feature flag.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | SQLite | `sqlite` | Embedded database, file or in-memory |
//! | PostgreSQL | `postgres` | The clinical tables of a PostgreSQL server |

/// Tables read by the lookups, in creation order.
pub const TABLES: [&str; 3] = ["patients", "blood_pressure", "heart_rate"];

/// Returns true if `database_url` names a PostgreSQL server rather than a
/// SQLite file.
pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_postgres_url() {
        assert!(is_postgres_url("postgres://localhost/clinical"));
        assert!(is_postgres_url("postgresql://u:p@db:5433/clinical"));
        assert!(!is_postgres_url("clinical.db"));
        assert!(!is_postgres_url(":memory:"));
        assert!(!is_postgres_url("/var/lib/postgres/clinical.db"));
    }
}
