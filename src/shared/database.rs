use std::str::FromStr;

use log::info;
use sqlx::sqlite::{
  SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};

use crate::shared::config::Config;

const CREATE_BOOKINGS_TABLE: &str = r#"
  CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    phone TEXT NOT NULL,
    pickup_name TEXT NOT NULL,
    pickup_lat REAL NOT NULL,
    pickup_lon REAL NOT NULL,
    drop_name TEXT NOT NULL,
    drop_lat REAL NOT NULL,
    drop_lon REAL NOT NULL,
    fare INTEGER NOT NULL,
    distance_km REAL NOT NULL,
    duration_min INTEGER NOT NULL,
    status TEXT NOT NULL,
    driver_id TEXT NOT NULL,
    driver_name TEXT NOT NULL,
    driver_vehicle TEXT NOT NULL,
    driver_eta_min INTEGER NOT NULL,
    created_at TEXT NOT NULL
  )
"#;

/// Owns the pool behind the booking store. Opened once at startup and shared
/// by every worker.
#[derive(Clone, Debug)]
pub struct Database {
  pub pool: SqlitePool,
}

impl Database {
  pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
    Self::connect(&config.database_url, config.database_max_connections).await
  }

  pub async fn connect(
    url: &str,
    max_connections: u32,
  ) -> Result<Self, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
      .create_if_missing(true)
      .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
      .max_connections(max_connections.max(1))
      .connect_with(options)
      .await?;
    let database = Self { pool };
    database.ensure_schema().await?;
    info!("Booking store ready at {url}");
    Ok(database)
  }

  async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_BOOKINGS_TABLE).execute(&self.pool).await?;
    Ok(())
  }

  pub async fn close(&self) {
    self.pool.close().await;
  }
}
