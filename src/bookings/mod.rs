pub mod dispatch;
pub mod driver_pool;
pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::{web, HttpResponse, Responder};
use dispatch::{BookingRequest, DispatchError, DispatchService};
use dto::create_booking_dto::CreateBookingDto;
use dto::end_trip_dto::EndTripDto;
use dto::estimate_dto::EstimateDto;
use log::{error, warn};
use model::Booking;
use repository::booking_repository::BookingRepository;
use rto::booking_rto::BookingRto;
use rto::estimate_rto::EstimateRto;
use validator::Validate;

use crate::routing::client::osrm_client::{RouteError, RouteProvider};
use crate::routing::fare::Estimate;
use crate::shared::{http_error::HttpError, rto::ok_rto::OkRto};

pub async fn estimate<BR: BookingRepository, RP: RouteProvider>(
  dispatch: web::Data<DispatchService<BR, RP>>,
  dto: web::Json<EstimateDto>,
) -> impl Responder {
  // Perform validation
  if let Err(validation_errors) = dto.validate() {
    return bad_request(validation_errors.to_string());
  }
  let EstimateDto { pickup, drop } = dto.into_inner();
  let (Some(pickup), Some(drop)) = (pickup, drop) else {
    return bad_request("pickup & drop required".to_string());
  };
  dispatch
    .estimate(&pickup.into(), &drop.into())
    .await
    .map(estimate_found)
    .unwrap_or_else(dispatch_failed)
}

fn estimate_found(estimate: Estimate) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("application/json")
    .json(EstimateRto::from(estimate))
}

pub async fn create_booking<BR: BookingRepository, RP: RouteProvider>(
  dispatch: web::Data<DispatchService<BR, RP>>,
  dto: web::Json<CreateBookingDto>,
) -> impl Responder {
  // Perform validation
  if let Err(validation_errors) = dto.validate() {
    return bad_request(validation_errors.to_string());
  }
  dispatch
    .create_booking(BookingRequest::from(dto.into_inner()))
    .await
    .map(booking_created)
    .unwrap_or_else(dispatch_failed)
}

fn booking_created(booking: Booking) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("application/json")
    .json(BookingRto::from(booking))
}

pub async fn list_active_bookings<BR: BookingRepository, RP: RouteProvider>(
  dispatch: web::Data<DispatchService<BR, RP>>,
) -> impl Responder {
  dispatch
    .list_active()
    .await
    .map(|bookings| {
      let bookings: Vec<BookingRto> =
        bookings.into_iter().map(BookingRto::from).collect();
      HttpResponse::Ok()
        .content_type("application/json")
        .json(bookings)
    })
    .unwrap_or_else(dispatch_failed)
}

pub async fn end_trip<BR: BookingRepository, RP: RouteProvider>(
  dispatch: web::Data<DispatchService<BR, RP>>,
  path: web::Path<EndTripDto>,
) -> impl Responder {
  let Some(id) = path.booking_id() else {
    return bad_request("invalid id".to_string());
  };
  dispatch
    .end_trip(id)
    .await
    .map(|_| {
      HttpResponse::Ok()
        .content_type("application/json")
        .json(OkRto::default())
    })
    .unwrap_or_else(dispatch_failed)
}

fn bad_request(message: String) -> HttpResponse {
  HttpResponse::BadRequest()
    .content_type("application/json")
    .json(HttpError::from(message))
}

fn internal_error(message: &str) -> HttpResponse {
  HttpResponse::InternalServerError()
    .content_type("application/json")
    .json(HttpError::from(message))
}

fn dispatch_failed(error: DispatchError) -> HttpResponse {
  match error {
    DispatchError::Validation(message) => bad_request(message),
    DispatchError::Route(RouteError::NoRoute) => {
      warn!("{error}");
      internal_error("no route found")
    }
    DispatchError::Route(_) => {
      error!("{error}");
      internal_error("route error")
    }
    DispatchError::Store(_) => {
      error!("{error}");
      internal_error("db error")
    }
  }
}

impl From<CreateBookingDto> for BookingRequest {
  fn from(dto: CreateBookingDto) -> Self {
    let quote = match (dto.distance_km, dto.duration_min, dto.fare) {
      (Some(distance_km), Some(duration_min), Some(fare)) => Some(Estimate {
        distance_km,
        duration_min,
        fare,
      }),
      _ => None,
    };
    Self {
      phone: dto.phone,
      pickup: dto.pickup.map(Into::into),
      drop: dto.drop.map(Into::into),
      quote,
    }
  }
}
