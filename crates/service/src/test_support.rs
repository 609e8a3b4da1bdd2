#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use common::FixedClock;

use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use models::client;

/// Fresh in-memory SQLite database with all migrations applied.
///
/// Pinned to one connection: every `sqlite::memory:` connection is its own
/// database.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_client(db: &DatabaseConnection, code: &str) -> Result<client::Model, anyhow::Error> {
    let am = client::ActiveModel {
        code: Set(code.to_string()),
        first_name: Set("Test".into()),
        last_name: Set(format!("Client {code}")),
        deleted: Set(false),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Clock pinned to 2024-05-01T12:00:00Z.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
}
