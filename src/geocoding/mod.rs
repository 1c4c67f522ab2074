pub mod client;
pub mod dto;
pub mod model;
pub mod rto;

use actix_web::{web, HttpResponse, Responder};
use client::nominatim_client::{GeocodeError, GeocodeProvider};
use dto::autocomplete_dto::AutocompleteDto;
use log::error;
use model::GeocodedPlace;
use rto::suggestion_rto::SuggestionRto;
use validator::Validate;

use crate::shared::http_error::HttpError;

/// Place search in front of a geocoding provider. Blank queries never reach
/// the provider.
#[derive(Debug)]
pub struct Geocoder<GP: GeocodeProvider> {
  provider: GP,
  result_limit: u8,
}

impl<GP: GeocodeProvider> Geocoder<GP> {
  pub fn new(provider: GP, result_limit: u8) -> Self {
    Self {
      provider,
      result_limit: result_limit.max(1),
    }
  }

  pub async fn search(
    &self,
    query: &str,
  ) -> Result<Vec<GeocodedPlace>, GeocodeError> {
    let query = query.trim();
    if query.is_empty() {
      return Ok(Vec::new());
    }
    self.provider.lookup(query, self.result_limit).await
  }
}

pub async fn autocomplete<GP: GeocodeProvider>(
  geocoder: web::Data<Geocoder<GP>>,
  query: web::Query<AutocompleteDto>,
) -> impl Responder {
  if let Err(validation_errors) = query.validate() {
    return HttpResponse::BadRequest()
      .json(HttpError::from(validation_errors.to_string()));
  }
  geocoder
    .search(&query.q)
    .await
    .map(suggestions_found)
    .unwrap_or_else(failed_geocode)
}

fn suggestions_found(places: Vec<GeocodedPlace>) -> HttpResponse {
  let suggestions: Vec<SuggestionRto> =
    places.into_iter().map(SuggestionRto::from).collect();
  HttpResponse::Ok()
    .content_type("application/json")
    .json(suggestions)
}

fn failed_geocode(error: GeocodeError) -> HttpResponse {
  error!("{error}");
  HttpResponse::InternalServerError()
    .content_type("application/json")
    .json(HttpError::from("geocode error"))
}
