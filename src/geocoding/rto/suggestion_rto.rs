use serde::{Deserialize, Serialize};

use crate::geocoding::model::GeocodedPlace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRto {
  pub id: u64,
  pub name: String,
  pub lat: f64,
  pub lon: f64,
}

impl From<GeocodedPlace> for SuggestionRto {
  fn from(candidate: GeocodedPlace) -> Self {
    Self {
      id: candidate.id,
      name: candidate.place.name,
      lat: candidate.place.lat,
      lon: candidate.place.lon,
    }
  }
}
