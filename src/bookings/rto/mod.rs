pub mod booking_rto;
pub mod estimate_rto;
