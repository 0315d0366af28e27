pub mod client;
pub mod endpoints;
pub mod models;
pub mod params;
pub mod static_data;
