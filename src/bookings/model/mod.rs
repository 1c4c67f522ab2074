use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::routing::fare::Estimate;
use crate::shared::model::place::Place;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
  Active,
  Ended,
}

impl BookingStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Ended => "ended",
    }
  }
}

impl fmt::Display for BookingStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
#[error("Unknown booking status {0:?}")]
pub struct UnknownBookingStatus(pub String);

impl FromStr for BookingStatus {
  type Err = UnknownBookingStatus;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "active" => Ok(Self::Active),
      "ended" => Ok(Self::Ended),
      other => Err(UnknownBookingStatus(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
  pub id: String,
  pub name: String,
  pub vehicle: String,
  pub eta_min: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
  pub id: i64,
  pub phone: String,
  pub pickup: Place,
  pub drop: Place,
  pub fare: i64,
  pub distance_km: f64,
  pub duration_min: i64,
  pub status: BookingStatus,
  pub driver: Driver,
  pub created_at: DateTime<Utc>,
}

/// Everything the store needs to persist a booking. The store assigns the id,
/// status and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
  pub phone: String,
  pub pickup: Place,
  pub drop: Place,
  pub estimate: Estimate,
  pub driver: Driver,
}
