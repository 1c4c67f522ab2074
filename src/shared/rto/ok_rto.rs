use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkRto {
  pub ok: bool,
}

impl Default for OkRto {
  fn default() -> Self {
    Self { ok: true }
  }
}
