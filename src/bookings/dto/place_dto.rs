use serde::Deserialize;
use validator_derive::Validate;

use crate::shared::model::place::Place;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceDto {
  #[serde(default)]
  pub name: String,
  #[validate(range(min = -90.0, max = 90.0, message = "lat out of range"))]
  pub lat: f64,
  #[validate(range(min = -180.0, max = 180.0, message = "lon out of range"))]
  pub lon: f64,
}

impl From<PlaceDto> for Place {
  fn from(dto: PlaceDto) -> Self {
    Self {
      name: dto.name,
      lat: dto.lat,
      lon: dto.lon,
    }
  }
}
