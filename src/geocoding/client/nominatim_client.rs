use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::geocoding::model::GeocodedPlace;
use crate::shared::config::Config;
use crate::shared::model::place::Place;

#[derive(Debug, Error)]
pub enum GeocodeError {
  #[error("Geocoding request failed: {0}")]
  RequestFailed(String),

  #[error("Geocoding parse error: {0}")]
  ParseError(String),
}

pub trait GeocodeProvider {
  async fn lookup(
    &self,
    query: &str,
    limit: u8,
  ) -> Result<Vec<GeocodedPlace>, GeocodeError>;
}

/// Free-text search against a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
  client: Client,
  base_url: String,
}

impl NominatimClient {
  pub fn new(config: &Config) -> Result<Self, GeocodeError> {
    // Nominatim's usage policy rejects requests without an identifying agent.
    let client = Client::builder()
      .timeout(Duration::from_secs(config.upstream_timeout_secs))
      .user_agent(config.geocoder_user_agent.clone())
      .build()
      .map_err(|error| GeocodeError::RequestFailed(error.to_string()))?;
    Ok(Self {
      client,
      base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
    })
  }
}

impl GeocodeProvider for NominatimClient {
  async fn lookup(
    &self,
    query: &str,
    limit: u8,
  ) -> Result<Vec<GeocodedPlace>, GeocodeError> {
    debug!("Geocoding {query:?}");
    let response = self
      .client
      .get(format!("{}/search", self.base_url))
      .query(&[
        ("q", query.to_string()),
        ("format", "jsonv2".to_string()),
        ("limit", limit.to_string()),
        ("addressdetails", "0".to_string()),
      ])
      .send()
      .await
      .map_err(|error| {
        warn!("Geocoding request failed: {error}");
        GeocodeError::RequestFailed(error.to_string())
      })?;

    if !response.status().is_success() {
      return Err(GeocodeError::RequestFailed(format!(
        "HTTP {}",
        response.status()
      )));
    }

    let results: Vec<NominatimResult> = response
      .json()
      .await
      .map_err(|error| GeocodeError::ParseError(error.to_string()))?;

    results.into_iter().map(GeocodedPlace::try_from).collect()
  }
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
  place_id: u64,
  display_name: String,
  lat: String,
  lon: String,
}

impl TryFrom<NominatimResult> for GeocodedPlace {
  type Error = GeocodeError;

  fn try_from(result: NominatimResult) -> Result<Self, Self::Error> {
    let lat = result.lat.parse().map_err(|_| {
      GeocodeError::ParseError(format!("Invalid latitude {:?}", result.lat))
    })?;
    let lon = result.lon.parse().map_err(|_| {
      GeocodeError::ParseError(format!("Invalid longitude {:?}", result.lon))
    })?;
    Ok(Self {
      id: result.place_id,
      place: Place::new(result.display_name, lat, lon),
    })
  }
}
