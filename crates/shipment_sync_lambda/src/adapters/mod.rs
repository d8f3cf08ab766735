pub mod http_client;
pub mod logistics_api;
