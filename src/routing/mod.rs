pub mod client;
pub mod fare;
pub mod model;
