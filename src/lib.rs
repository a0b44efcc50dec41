pub mod address;
pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod geocode;
pub mod routes;
pub mod translation;
pub mod upstream;
