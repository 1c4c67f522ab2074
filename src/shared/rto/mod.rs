pub mod ok_rto;
pub mod place_rto;
