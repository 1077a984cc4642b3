use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase};

use crate::database::Database;

pub async fn test_db() -> Arc<Database> {
    // In-memory sqlite gives every pooled connection its own database, so
    // the pool must be capped at a single connection.
    let mut opt = ConnectOptions::new("sqlite::memory:?mode=rwc");
    opt.max_connections(1).min_connections(1);

    let conn = SeaDatabase::connect(opt).await.unwrap();

    // Enable foreign keys
    conn.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();

    migration::Migrator::up(&conn, None).await.unwrap();

    Arc::new(Database { conn })
}
