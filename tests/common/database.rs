//! Database test fixtures and utilities
//!
//! Database-backed tests run against the PostgreSQL instance named by
//! `DATABASE_URL`. When the variable is unset the fixture is `None` and the
//! calling test returns early, so the suite still passes on machines
//! without a database.

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Open a pool to the test database, if one is configured
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty())?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("DATABASE_URL is set but the database is unreachable");
    Some(pool)
}

/// Run database migrations for testing
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Test database fixture
///
/// Tests share one database, so fixtures create uniquely named records
/// instead of truncating tables.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no database is configured
    pub async fn try_new() -> Option<Self> {
        let pool = create_test_pool().await?;
        run_migrations(&pool).await.expect("Failed to run migrations");
        Some(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Bind a `TestDatabase` or skip the current test
macro_rules! require_db {
    () => {
        match $crate::common::database::TestDatabase::try_new().await {
            Some(db) => db,
            None => {
                eprintln!("DATABASE_URL not set; skipping database test");
                return;
            }
        }
    };
}
