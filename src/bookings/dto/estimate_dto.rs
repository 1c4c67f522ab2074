use serde::Deserialize;
use validator::Validate;
use validator_derive::Validate;

use super::place_dto::PlaceDto;

#[derive(Debug, Deserialize, Validate)]
pub struct EstimateDto {
  #[validate(nested)]
  pub pickup: Option<PlaceDto>,
  #[validate(nested)]
  pub drop: Option<PlaceDto>,
}
