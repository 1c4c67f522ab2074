use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EndTripDto {
  pub id: String,
}

impl EndTripDto {
  /// Only positive integers name a booking.
  pub fn booking_id(&self) -> Option<i64> {
    self.id.trim().parse::<i64>().ok().filter(|id| *id > 0)
  }
}
