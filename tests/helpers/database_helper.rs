//! Test database helper utilities
//!
//! Database tests run against `TEST_DATABASE_URL` and are skipped when it is unset.

use std::sync::Once;
use sqlx::PgPool;

static INIT: Once = Once::new();

pub struct TestDatabase {
    pub pool: PgPool,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no test database is configured
    pub async fn connect() -> Option<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt::try_init();
        });

        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.expect("Failed to connect to test database");
        astroclub::database::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let db = Self { pool };
        db.cleanup().await.expect("Failed to clean test database");
        Some(db)
    }

    /// Clean all test data from the database
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        // Delete in reverse order of dependencies
        sqlx::query("DELETE FROM event_participants").execute(&self.pool).await?;
        sqlx::query("DELETE FROM event_telescopes").execute(&self.pool).await?;
        sqlx::query("DELETE FROM event_team_members").execute(&self.pool).await?;
        sqlx::query("DELETE FROM event_celestial_objects").execute(&self.pool).await?;
        sqlx::query("DELETE FROM events").execute(&self.pool).await?;

        Ok(())
    }
}
