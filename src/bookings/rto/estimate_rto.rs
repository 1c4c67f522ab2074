use serde::{Deserialize, Serialize};

use crate::routing::fare::Estimate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRto {
  pub distance_km: f64,
  pub duration_min: i64,
  pub fare: i64,
}

impl From<Estimate> for EstimateRto {
  fn from(estimate: Estimate) -> Self {
    Self {
      distance_km: estimate.distance_km,
      duration_min: estimate.duration_min,
      fare: estimate.fare,
    }
  }
}
