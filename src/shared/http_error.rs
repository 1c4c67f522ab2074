use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
  pub error: String,
}

impl From<&str> for HttpError {
  fn from(error: &str) -> Self {
    Self { error: String::from(error) }
  }
}

impl From<String> for HttpError {
  fn from(error: String) -> Self {
    Self { error }
  }
}
