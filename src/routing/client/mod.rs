pub mod osrm_client;
