use log::{info, warn};
use thiserror::Error;

use crate::bookings::driver_pool::DriverPool;
use crate::bookings::model::{Booking, NewBooking};
use crate::bookings::repository::booking_repository::{
  BookingRepository, BookingRepositoryError,
};
use crate::bookings::rto::booking_rto::BookingRto;
use crate::notifications::notifier::{BookingEnded, BookingEvent, Notifier};
use crate::routing::client::osrm_client::{RouteError, RouteProvider};
use crate::routing::fare::{Estimate, FareSchedule};
use crate::shared::model::place::Place;

#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("{0}")]
  Validation(String),

  #[error(transparent)]
  Route(#[from] RouteError),

  #[error(transparent)]
  Store(#[from] BookingRepositoryError),
}

/// A rider's booking request. `quote` holds the numbers the client got from
/// an earlier estimate, if it sent them.
#[derive(Debug, Clone)]
pub struct BookingRequest {
  pub phone: String,
  pub pickup: Option<Place>,
  pub drop: Option<Place>,
  pub quote: Option<Estimate>,
}

pub struct DispatchService<BR: BookingRepository, RP: RouteProvider> {
  bookings: BR,
  router: RP,
  fares: FareSchedule,
  drivers: DriverPool,
  notifier: Notifier,
  verify_estimates: bool,
}

impl<BR: BookingRepository, RP: RouteProvider> DispatchService<BR, RP> {
  pub fn new(
    bookings: BR,
    router: RP,
    fares: FareSchedule,
    drivers: DriverPool,
    notifier: Notifier,
  ) -> Self {
    Self {
      bookings,
      router,
      fares,
      drivers,
      notifier,
      verify_estimates: true,
    }
  }

  /// With verification off the client's quote is persisted as sent.
  pub fn verify_estimates(mut self, verify: bool) -> Self {
    self.verify_estimates = verify;
    self
  }

  pub async fn estimate(
    &self,
    pickup: &Place,
    drop: &Place,
  ) -> Result<Estimate, DispatchError> {
    let route = self
      .router
      .route(pickup.coordinates(), drop.coordinates())
      .await?;
    Ok(Estimate::from_route(route, &self.fares))
  }

  /// Persists an active booking with a freshly drawn driver and announces it.
  /// Nothing is written unless every step before the insert succeeds.
  pub async fn create_booking(
    &self,
    request: BookingRequest,
  ) -> Result<Booking, DispatchError> {
    let phone = request.phone.trim();
    if phone.is_empty() {
      return Err(DispatchError::Validation("phone is required".to_string()));
    }
    let (Some(pickup), Some(drop)) = (request.pickup, request.drop) else {
      return Err(DispatchError::Validation(
        "pickup & drop required".to_string(),
      ));
    };

    let estimate = if self.verify_estimates {
      let verified = self.estimate(&pickup, &drop).await?;
      if let Some(quote) = request.quote.filter(|quote| *quote != verified) {
        warn!(
          "Client quote {quote:?} differs from verified estimate {verified:?}, using the verified one"
        );
      }
      verified
    } else {
      request.quote.ok_or_else(|| {
        DispatchError::Validation(
          "distance_km, duration_min and fare are required".to_string(),
        )
      })?
    };

    let booking = self
      .bookings
      .insert(NewBooking {
        phone: phone.to_string(),
        pickup,
        drop,
        estimate,
        driver: self.drivers.assign(),
      })
      .await?;
    info!(
      "Booking {} created, driver {} arriving in {} min",
      booking.id, booking.driver.id, booking.driver.eta_min
    );

    self
      .notifier
      .publish(BookingEvent::BookingCreated(BookingRto::from(booking.clone())));
    Ok(booking)
  }

  /// Ends the trip by removing its booking. Ending an unknown or already
  /// ended trip still succeeds; the return value says whether a row existed.
  pub async fn end_trip(&self, id: i64) -> Result<bool, DispatchError> {
    let removed = self.bookings.delete(id).await?;
    if removed {
      info!("Booking {id} ended");
    }
    self
      .notifier
      .publish(BookingEvent::BookingEnded(BookingEnded { id }));
    Ok(removed)
  }

  pub async fn list_active(&self) -> Result<Vec<Booking>, DispatchError> {
    Ok(self.bookings.list_active().await?)
  }
}
