use crate::shared::model::place::Place;

/// A geocoder candidate: a place plus the provider's identifier for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
  pub id: u64,
  pub place: Place,
}
