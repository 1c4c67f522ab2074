use serde::Deserialize;
use validator_derive::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AutocompleteDto {
  #[serde(default)]
  #[validate(length(max = 256, message = "query too long"))]
  pub q: String,
}
