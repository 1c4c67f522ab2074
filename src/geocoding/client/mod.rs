pub mod nominatim_client;
