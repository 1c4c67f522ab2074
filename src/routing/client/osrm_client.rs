use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::routing::model::{Coordinates, RouteSummary};
use crate::shared::config::Config;

#[derive(Debug, Error)]
pub enum RouteError {
  #[error("No route between the given points")]
  NoRoute,

  #[error("Route provider error: {0}")]
  Provider(String),
}

pub trait RouteProvider {
  async fn route(
    &self,
    origin: Coordinates,
    destination: Coordinates,
  ) -> Result<RouteSummary, RouteError>;
}

/// Client for an OSRM `route/v1` endpoint. A single attempt per call; any
/// failure is returned to the caller as is.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
  client: Client,
  base_url: String,
  profile: String,
}

impl OsrmRouter {
  pub fn new(config: &Config) -> Result<Self, RouteError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.upstream_timeout_secs))
      .build()
      .map_err(|error| RouteError::Provider(error.to_string()))?;
    Ok(Self {
      client,
      base_url: config.router_base_url.trim_end_matches('/').to_string(),
      profile: config.router_profile.clone(),
    })
  }

  fn route_url(&self, origin: Coordinates, destination: Coordinates) -> String {
    format!(
      "{}/route/v1/{}/{},{};{},{}",
      self.base_url,
      self.profile,
      origin.lon,
      origin.lat,
      destination.lon,
      destination.lat
    )
  }
}

impl RouteProvider for OsrmRouter {
  async fn route(
    &self,
    origin: Coordinates,
    destination: Coordinates,
  ) -> Result<RouteSummary, RouteError> {
    let url = self.route_url(origin, destination);
    debug!("Requesting route {url}");

    let response = self
      .client
      .get(&url)
      .query(&[
        ("overview", "false"),
        ("alternatives", "false"),
        ("steps", "false"),
      ])
      .send()
      .await
      .map_err(|error| {
        warn!("Route request failed: {error}");
        RouteError::Provider(error.to_string())
      })?;

    let status = response.status();
    let body: OsrmResponse = response.json().await.map_err(|error| {
      RouteError::Provider(format!("HTTP {status}: {error}"))
    })?;

    // OSRM answers unroutable pairs with a 400 and code "NoRoute".
    if body.code == "NoRoute" {
      return Err(RouteError::NoRoute);
    }
    if !status.is_success() {
      return Err(RouteError::Provider(format!(
        "HTTP {status}: {}",
        body.message.unwrap_or(body.code)
      )));
    }

    body
      .routes
      .first()
      .map(|route| RouteSummary {
        distance_m: route.distance,
        duration_s: route.duration,
      })
      .ok_or(RouteError::NoRoute)
  }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
  code: String,
  message: Option<String>,
  #[serde(default)]
  routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
  distance: f64,
  duration: f64,
}

#[cfg(test)]
pub mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  /// Test double answering every request with the same outcome.
  pub struct StubRouteProvider {
    summary: Option<RouteSummary>,
    failure: Option<String>,
    pub calls: AtomicUsize,
  }

  impl StubRouteProvider {
    pub fn returning(distance_m: f64, duration_s: f64) -> Self {
      Self {
        summary: Some(RouteSummary {
          distance_m,
          duration_s,
        }),
        failure: None,
        calls: AtomicUsize::new(0),
      }
    }

    pub fn without_route() -> Self {
      Self {
        summary: None,
        failure: None,
        calls: AtomicUsize::new(0),
      }
    }

    pub fn failing(message: &str) -> Self {
      Self {
        summary: None,
        failure: Some(message.to_string()),
        calls: AtomicUsize::new(0),
      }
    }
  }

  impl RouteProvider for StubRouteProvider {
    async fn route(
      &self,
      _origin: Coordinates,
      _destination: Coordinates,
    ) -> Result<RouteSummary, RouteError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if let Some(message) = &self.failure {
        return Err(RouteError::Provider(message.clone()));
      }
      self.summary.ok_or(RouteError::NoRoute)
    }
  }

  fn router_for(server: &MockServer) -> OsrmRouter {
    let config = Config {
      router_base_url: server.uri(),
      upstream_timeout_secs: 5,
      ..Config::default()
    };
    OsrmRouter::new(&config).unwrap()
  }

  const LUCKNOW: Coordinates = Coordinates {
    lat: 26.85,
    lon: 80.95,
  };
  const HAZRATGANJ: Coordinates = Coordinates {
    lat: 26.8467,
    lon: 80.9462,
  };

  #[test]
  fn test_route_url_orders_lon_before_lat() {
    let config = Config {
      router_base_url: "http://osrm.local/".to_string(),
      ..Config::default()
    };
    let router = OsrmRouter::new(&config).unwrap();
    assert_eq!(
      router.route_url(LUCKNOW, HAZRATGANJ),
      "http://osrm.local/route/v1/driving/80.95,26.85;80.9462,26.8467"
    );
  }

  #[actix_rt::test]
  async fn test_route_returns_first_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/route/v1/driving/80.95,26.85;80.9462,26.8467"))
      .and(query_param("overview", "false"))
      .respond_with(ResponseTemplate::new(200).set_body_json(
        serde_json::json!({
          "code": "Ok",
          "routes": [
            { "distance": 1000.0, "duration": 120.0 },
            { "distance": 1500.0, "duration": 100.0 }
          ]
        }),
      ))
      .expect(1)
      .mount(&server)
      .await;

    let summary = router_for(&server)
      .route(LUCKNOW, HAZRATGANJ)
      .await
      .unwrap();
    assert_eq!(summary.distance_m, 1000.0);
    assert_eq!(summary.duration_s, 120.0);
  }

  #[actix_rt::test]
  async fn test_route_without_routes_is_no_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!({ "code": "Ok", "routes": [] })),
      )
      .mount(&server)
      .await;

    let error = router_for(&server)
      .route(LUCKNOW, HAZRATGANJ)
      .await
      .unwrap_err();
    assert!(matches!(error, RouteError::NoRoute));
  }

  #[actix_rt::test]
  async fn test_route_no_route_code_is_no_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(400).set_body_json(
        serde_json::json!({ "code": "NoRoute", "message": "Impossible route" }),
      ))
      .mount(&server)
      .await;

    let error = router_for(&server)
      .route(LUCKNOW, HAZRATGANJ)
      .await
      .unwrap_err();
    assert!(matches!(error, RouteError::NoRoute));
  }

  #[actix_rt::test]
  async fn test_route_invalid_query_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(400).set_body_json(
        serde_json::json!({ "code": "InvalidQuery", "message": "Bad coords" }),
      ))
      .mount(&server)
      .await;

    let error = router_for(&server)
      .route(LUCKNOW, HAZRATGANJ)
      .await
      .unwrap_err();
    assert!(matches!(error, RouteError::Provider(message) if message.contains("Bad coords")));
  }

  #[actix_rt::test]
  async fn test_route_garbage_body_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
      .mount(&server)
      .await;

    let error = router_for(&server)
      .route(LUCKNOW, HAZRATGANJ)
      .await
      .unwrap_err();
    assert!(matches!(error, RouteError::Provider(_)));
  }
}
