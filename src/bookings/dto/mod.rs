pub mod create_booking_dto;
pub mod end_trip_dto;
pub mod estimate_dto;
pub mod place_dto;
