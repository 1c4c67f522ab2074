use std::{env, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
  pub bind_address: String,
  pub database_url: String,
  pub database_max_connections: u32,
  pub base_fare: i64,
  pub per_km_rate: f64,
  pub geocoder_base_url: String,
  pub geocoder_user_agent: String,
  pub geocoder_result_limit: u8,
  pub router_base_url: String,
  pub router_profile: String,
  pub upstream_timeout_secs: u64,
  pub driver_seed: Option<u64>,
  pub verify_estimates: bool,
  pub rate_limit_per_second: u64,
  pub rate_limit_burst: u32,
  /// Origins allowed to call the API from a browser. Empty allows any.
  pub allowed_origins: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind_address: env_string("BIND_ADDRESS", "127.0.0.1:3000"),
      database_url: env_string("DATABASE_URL", "sqlite://bookings.sqlite3"),
      database_max_connections: env_parsed("DATABASE_MAX_CONNECTIONS", 5),
      base_fare: env_parsed("BASE_FARE", 20),
      per_km_rate: env_parsed("PER_KM_RATE", 10.0),
      geocoder_base_url: env_string(
        "GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org",
      ),
      geocoder_user_agent: env_string(
        "GEOCODER_USER_AGENT",
        "ride-dispatch/0.1 (ops@example.com)",
      ),
      geocoder_result_limit: env_parsed("GEOCODER_RESULT_LIMIT", 5),
      router_base_url: env_string(
        "ROUTER_BASE_URL",
        "https://router.project-osrm.org",
      ),
      router_profile: env_string("ROUTER_PROFILE", "driving"),
      upstream_timeout_secs: env_parsed("UPSTREAM_TIMEOUT_SECS", 10),
      driver_seed: env::var("DRIVER_SEED")
        .ok()
        .and_then(|seed| parse_or_warn("DRIVER_SEED", &seed)),
      verify_estimates: env_parsed("VERIFY_ESTIMATES", true),
      rate_limit_per_second: env_parsed("RATE_LIMIT_PER_SECOND", 10),
      rate_limit_burst: env_parsed("RATE_LIMIT_BURST", 20),
      allowed_origins: env_list("ALLOWED_ORIGINS"),
    }
  }
}

fn env_string(key: &str, default: &str) -> String {
  env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_list(key: &str) -> Vec<String> {
  env::var(key)
    .map(|value| {
      value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
    })
    .unwrap_or_default()
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
  env::var(key)
    .ok()
    .and_then(|value| parse_or_warn(key, &value))
    .unwrap_or(default)
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
  let parsed = value.trim().parse().ok();
  if parsed.is_none() {
    warn!("Ignoring unparseable {key}={value:?}, using the default");
  }
  parsed
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config_runner() {
    test_default_config();
    test_default_config_with_missing_env_vars();
    test_default_config_with_invalid_numbers();
  }

  fn test_default_config() {
    // Temporarily set environment variables
    env::set_var("DATABASE_URL", "sqlite://test.sqlite3");
    env::set_var("BASE_FARE", "35");
    env::set_var("PER_KM_RATE", "12.5");
    env::set_var("DRIVER_SEED", "42");
    env::set_var("VERIFY_ESTIMATES", "false");
    env::set_var("ALLOWED_ORIGINS", " https://rides.example ,, http://localhost:5173");

    let config = Config::default();
    assert_eq!(config.database_url, "sqlite://test.sqlite3");
    assert_eq!(config.base_fare, 35);
    assert_eq!(config.per_km_rate, 12.5);
    assert_eq!(config.driver_seed, Some(42));
    assert!(!config.verify_estimates);
    assert_eq!(
      config.allowed_origins,
      vec!["https://rides.example", "http://localhost:5173"]
    );

    // Clean up environment variables
    env::remove_var("DATABASE_URL");
    env::remove_var("BASE_FARE");
    env::remove_var("PER_KM_RATE");
    env::remove_var("DRIVER_SEED");
    env::remove_var("VERIFY_ESTIMATES");
    env::remove_var("ALLOWED_ORIGINS");
  }

  fn test_default_config_with_missing_env_vars() {
    // Ensure environment variables are unset
    env::remove_var("DATABASE_URL");
    env::remove_var("BASE_FARE");
    env::remove_var("DRIVER_SEED");

    let config = Config::default();
    assert_eq!(config.database_url, "sqlite://bookings.sqlite3");
    assert_eq!(config.base_fare, 20);
    assert_eq!(config.per_km_rate, 10.0);
    assert_eq!(config.driver_seed, None);
    assert!(config.verify_estimates);
    assert_eq!(config.router_profile, "driving");
    assert!(config.allowed_origins.is_empty());
  }

  fn test_default_config_with_invalid_numbers() {
    env::set_var("BASE_FARE", "twenty");
    env::set_var("DRIVER_SEED", "-1");

    let config = Config::default();
    assert_eq!(config.base_fare, 20);
    assert_eq!(config.driver_seed, None);

    env::remove_var("BASE_FARE");
    env::remove_var("DRIVER_SEED");
  }

  #[test]
  fn test_serialization() {
    let config = Config {
      database_url: "sqlite::memory:".to_string(),
      geocoder_user_agent: "agent/1.0".to_string(),
      ..Config::default()
    };

    let serialized =
      serde_json::to_string(&config).expect("Failed to serialize");
    assert!(serialized.contains("sqlite::memory:"));
    assert!(serialized.contains("agent/1.0"));
  }
}
