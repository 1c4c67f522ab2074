pub mod suggestion_rto;
