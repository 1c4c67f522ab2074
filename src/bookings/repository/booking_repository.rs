use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};
use thiserror::Error;

use crate::bookings::model::{Booking, BookingStatus, Driver, NewBooking};
use crate::shared::database::Database;
use crate::shared::model::place::Place;

#[derive(Debug, Error)]
pub enum BookingRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(#[from] sqlx::Error),
}

pub trait BookingRepository {
  /// Persists the booking as `active` and returns the stored row.
  async fn insert(
    &self,
    new_booking: NewBooking,
  ) -> Result<Booking, BookingRepositoryError>;

  /// Active bookings, most recent first.
  async fn list_active(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

  /// Returns whether a row was removed.
  async fn delete(&self, id: i64) -> Result<bool, BookingRepositoryError>;
}

#[derive(Debug, Clone)]
pub struct SqliteBookingRepository {
  pool: SqlitePool,
}

impl SqliteBookingRepository {
  pub fn new(database: &Database) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl BookingRepository for SqliteBookingRepository {
  async fn insert(
    &self,
    new_booking: NewBooking,
  ) -> Result<Booking, BookingRepositoryError> {
    let query = r#"
      INSERT INTO bookings (
        phone,
        pickup_name, pickup_lat, pickup_lon,
        drop_name, drop_lat, drop_lon,
        fare, distance_km, duration_min, status,
        driver_id, driver_name, driver_vehicle, driver_eta_min,
        created_at
      )
      VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
      RETURNING *
    "#;
    sqlx::query_as::<_, Booking>(query)
      .bind(&new_booking.phone)
      .bind(&new_booking.pickup.name)
      .bind(new_booking.pickup.lat)
      .bind(new_booking.pickup.lon)
      .bind(&new_booking.drop.name)
      .bind(new_booking.drop.lat)
      .bind(new_booking.drop.lon)
      .bind(new_booking.estimate.fare)
      .bind(new_booking.estimate.distance_km)
      .bind(new_booking.estimate.duration_min)
      .bind(BookingStatus::Active.as_str())
      .bind(&new_booking.driver.id)
      .bind(&new_booking.driver.name)
      .bind(&new_booking.driver.vehicle)
      .bind(new_booking.driver.eta_min)
      .bind(Utc::now())
      .fetch_one(&self.pool)
      .await
      .map_err(BookingRepositoryError::from)
  }

  async fn list_active(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
    let query = r#"
      SELECT * FROM bookings
      WHERE status = ?
      ORDER BY created_at DESC, id DESC
    "#;
    sqlx::query_as::<_, Booking>(query)
      .bind(BookingStatus::Active.as_str())
      .fetch_all(&self.pool)
      .await
      .map_err(BookingRepositoryError::from)
  }

  async fn delete(&self, id: i64) -> Result<bool, BookingRepositoryError> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}

impl<'r> FromRow<'r, SqliteRow> for Booking {
  fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Self {
      id: row.try_get("id")?,
      phone: row.try_get("phone")?,
      pickup: Place {
        name: row.try_get("pickup_name")?,
        lat: row.try_get("pickup_lat")?,
        lon: row.try_get("pickup_lon")?,
      },
      drop: Place {
        name: row.try_get("drop_name")?,
        lat: row.try_get("drop_lat")?,
        lon: row.try_get("drop_lon")?,
      },
      fare: row.try_get("fare")?,
      distance_km: row.try_get("distance_km")?,
      duration_min: row.try_get("duration_min")?,
      status: status
        .parse::<BookingStatus>()
        .map_err(|error| sqlx::Error::Decode(Box::new(error)))?,
      driver: Driver {
        id: row.try_get("driver_id")?,
        name: row.try_get("driver_name")?,
        vehicle: row.try_get("driver_vehicle")?,
        eta_min: row.try_get("driver_eta_min")?,
      },
      created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
  }
}
