/// A WGS84 point as the routing provider expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
  pub lat: f64,
  pub lon: f64,
}

/// What the router reports for the best path between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
  pub distance_m: f64,
  pub duration_s: f64,
}
