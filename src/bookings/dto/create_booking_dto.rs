use serde::Deserialize;
use validator::Validate;
use validator_derive::Validate;

use super::place_dto::PlaceDto;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingDto {
  #[serde(default)]
  #[validate(length(min = 1, message = "phone is required"))]
  pub phone: String,
  #[validate(nested)]
  pub pickup: Option<PlaceDto>,
  #[validate(nested)]
  pub drop: Option<PlaceDto>,
  #[validate(range(min = 0.0, message = "distance_km must not be negative"))]
  pub distance_km: Option<f64>,
  #[validate(range(min = 0, message = "duration_min must not be negative"))]
  pub duration_min: Option<i64>,
  #[validate(range(min = 0, message = "fare must not be negative"))]
  pub fare: Option<i64>,
}
