use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bookings::model::{Booking, Driver};
use crate::shared::rto::place_rto::PlaceRto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRto {
  pub id: String,
  pub name: String,
  pub vehicle: String,
  pub eta_min: i64,
}

impl From<Driver> for DriverRto {
  fn from(driver: Driver) -> Self {
    Self {
      id: driver.id,
      name: driver.name,
      vehicle: driver.vehicle,
      eta_min: driver.eta_min,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRto {
  pub id: i64,
  pub phone: String,
  pub pickup: PlaceRto,
  pub drop: PlaceRto,
  pub fare: i64,
  pub distance_km: f64,
  pub duration_min: i64,
  pub status: String,
  pub created_at: DateTime<Utc>,
  pub driver: DriverRto,
}

impl From<Booking> for BookingRto {
  fn from(booking: Booking) -> Self {
    Self {
      id: booking.id,
      phone: booking.phone,
      pickup: PlaceRto::from(booking.pickup),
      drop: PlaceRto::from(booking.drop),
      fare: booking.fare,
      distance_km: booking.distance_km,
      duration_min: booking.duration_min,
      status: booking.status.to_string(),
      created_at: booking.created_at,
      driver: DriverRto::from(booking.driver),
    }
  }
}
