use serde::{Deserialize, Serialize};

use crate::shared::model::place::Place;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRto {
  pub name: String,
  pub lat: f64,
  pub lon: f64,
}

impl From<Place> for PlaceRto {
  fn from(place: Place) -> Self {
    Self {
      name: place.name,
      lat: place.lat,
      lon: place.lon,
    }
  }
}
