use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::bookings::model::Driver;

const DRIVER_NAMES: [&str; 4] = ["Rakesh", "Suresh", "Priya", "Asha"];
const VEHICLE: &str = "E-Rickshaw";
const MAX_ETA_MIN: i64 = 6;

/// Simulated driver assignment. There is no real fleet: every booking gets a
/// randomly drawn driver. Seed it to make the draws reproducible.
#[derive(Debug)]
pub struct DriverPool {
  rng: Mutex<StdRng>,
}

impl DriverPool {
  pub fn new(seed: Option<u64>) -> Self {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self {
      rng: Mutex::new(rng),
    }
  }

  pub fn assign(&self) -> Driver {
    let mut rng = self
      .rng
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());
    let name = DRIVER_NAMES.choose(&mut *rng).copied().unwrap_or("Asha");
    Driver {
      id: format!("DRV{}", rng.gen_range(1000..=9999)),
      name: name.to_string(),
      vehicle: VEHICLE.to_string(),
      eta_min: rng.gen_range(1..=MAX_ETA_MIN),
    }
  }
}
