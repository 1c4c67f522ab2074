use crate::routing::model::RouteSummary;
use crate::shared::config::Config;

/// Prices a trip from its distance: a base fare plus a per-kilometre rate,
/// never below the base fare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareSchedule {
  pub base_fare: i64,
  pub per_km_rate: f64,
}

impl Default for FareSchedule {
  fn default() -> Self {
    Self {
      base_fare: 20,
      per_km_rate: 10.0,
    }
  }
}

impl From<&Config> for FareSchedule {
  fn from(config: &Config) -> Self {
    Self {
      base_fare: config.base_fare,
      per_km_rate: config.per_km_rate,
    }
  }
}

impl FareSchedule {
  /// `distance_km` must be non-negative; callers validate upstream.
  pub fn fare(&self, distance_km: f64) -> i64 {
    let raw = (self.base_fare as f64 + self.per_km_rate * distance_km).round();
    self.base_fare.max(raw as i64)
  }
}

/// A quote for one trip. Never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
  pub distance_km: f64,
  pub duration_min: i64,
  pub fare: i64,
}

impl Estimate {
  pub fn from_route(route: RouteSummary, schedule: &FareSchedule) -> Self {
    let distance_km = route.distance_m.max(0.0) / 1000.0;
    Self {
      // Kilometres are reported to the metre.
      distance_km: (distance_km * 1000.0).round() / 1000.0,
      duration_min: (route.duration_s.max(0.0) / 60.0).round() as i64,
      fare: schedule.fare(distance_km),
    }
  }
}
