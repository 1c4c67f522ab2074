mod bookings;
mod geocoding;
mod notifications;
mod routing;
mod shared;

use std::io;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
  error::{InternalError, JsonPayloadError},
  middleware::Logger,
  web, App, HttpRequest, HttpResponse, HttpServer,
};
use bookings::dispatch::DispatchService;
use bookings::driver_pool::DriverPool;
use bookings::repository::booking_repository::{
  BookingRepository, SqliteBookingRepository,
};
use bookings::{create_booking, end_trip, estimate, list_active_bookings};
use geocoding::client::nominatim_client::{GeocodeProvider, NominatimClient};
use geocoding::{autocomplete, Geocoder};
use log::info;
use notifications::notifier::Notifier;
use routing::client::osrm_client::{OsrmRouter, RouteProvider};
use routing::fare::FareSchedule;
use shared::config::Config;
use shared::database::Database;
use shared::http_error::HttpError;

// Everything a request handler may touch, built once at startup and shared by
// every worker.
struct ServiceContext<BR, GP, RP>
where
  BR: BookingRepository,
  GP: GeocodeProvider,
  RP: RouteProvider,
{
  dispatch: web::Data<DispatchService<BR, RP>>,
  geocoder: web::Data<Geocoder<GP>>,
  notifier: web::Data<Notifier>,
  config: Config,
}

impl<BR, GP, RP> Clone for ServiceContext<BR, GP, RP>
where
  BR: BookingRepository,
  GP: GeocodeProvider,
  RP: RouteProvider,
{
  fn clone(&self) -> Self {
    Self {
      dispatch: self.dispatch.clone(),
      geocoder: self.geocoder.clone(),
      notifier: self.notifier.clone(),
      config: self.config.clone(),
    }
  }
}

impl<BR, GP, RP> ServiceContext<BR, GP, RP>
where
  BR: BookingRepository,
  GP: GeocodeProvider,
  RP: RouteProvider,
{
  fn new(
    config: Config,
    bookings: BR,
    geocode_provider: GP,
    route_provider: RP,
  ) -> Self {
    let notifier = Notifier::default();
    let dispatch = DispatchService::new(
      bookings,
      route_provider,
      FareSchedule::from(&config),
      DriverPool::new(config.driver_seed),
      notifier.clone(),
    )
    .verify_estimates(config.verify_estimates);
    Self {
      dispatch: web::Data::new(dispatch),
      geocoder: web::Data::new(Geocoder::new(
        geocode_provider,
        config.geocoder_result_limit,
      )),
      notifier: web::Data::new(notifier),
      config,
    }
  }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

  let config = Config::default();
  let database = Database::new(&config).await.map_err(io::Error::other)?;
  let context = ServiceContext::new(
    config.clone(),
    SqliteBookingRepository::new(&database),
    NominatimClient::new(&config).map_err(io::Error::other)?,
    OsrmRouter::new(&config).map_err(io::Error::other)?,
  );

  info!("Listening on http://{}", config.bind_address);
  HttpServer::new(move || {
    let context = context.clone();
    App::new()
      .wrap(Logger::default())
      .configure(move |cfg| configure(cfg, context))
  })
  .bind(&config.bind_address)?
  .run()
  .await?;

  database.close().await;
  info!("Booking store closed");
  Ok(())
}

// Function to initialize the App
fn configure<BR, GP, RP>(
  cfg: &mut web::ServiceConfig,
  context: ServiceContext<BR, GP, RP>,
) where
  BR: BookingRepository + 'static,
  GP: GeocodeProvider + 'static,
  RP: RouteProvider + 'static,
{
  let cors = cors(&context.config.allowed_origins);

  // Rate limit per client IP
  let governor_config = GovernorConfigBuilder::default()
    .requests_per_second(context.config.rate_limit_per_second.max(1))
    .burst_size(context.config.rate_limit_burst.max(1))
    .finish()
    .unwrap_or_default();

  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(context.dispatch)
    .app_data(context.geocoder)
    .app_data(context.notifier)
    .route("/ws", web::get().to(notifications::subscribe))
    .service(
      web::scope("/api")
        .wrap(Governor::new(&governor_config))
        .wrap(cors)
        .route("/autocomplete", web::get().to(autocomplete::<GP>))
        .route("/estimate", web::post().to(estimate::<BR, RP>))
        .service(
          web::scope("/bookings")
            .route("", web::post().to(create_booking::<BR, RP>))
            .route("/active", web::get().to(list_active_bookings::<BR, RP>))
            .route("/{id}/end", web::post().to(end_trip::<BR, RP>)),
        ),
    );
}

fn cors(allowed_origins: &[String]) -> Cors {
  if allowed_origins.is_empty() {
    return Cors::permissive();
  }
  allowed_origins.iter().fold(
    Cors::default()
      .allowed_methods(vec!["GET", "POST"])
      .allow_any_header()
      .max_age(3600),
    |cors, origin| cors.allowed_origin(origin),
  )
}

fn json_error_handler(
  error: JsonPayloadError,
  _request: &HttpRequest,
) -> actix_web::Error {
  let response =
    HttpResponse::BadRequest().json(HttpError::from(error.to_string()));
  InternalError::from_response(error, response).into()
}
