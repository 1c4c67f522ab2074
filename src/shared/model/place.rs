use crate::routing::model::Coordinates;

/// A named point, either geocoded or typed in by the rider. Identity is its
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
  pub name: String,
  pub lat: f64,
  pub lon: f64,
}

impl Place {
  pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
    Self {
      name: name.into(),
      lat,
      lon,
    }
  }

  pub fn coordinates(&self) -> Coordinates {
    Coordinates {
      lat: self.lat,
      lon: self.lon,
    }
  }
}
