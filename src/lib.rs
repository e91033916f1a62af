/// Ninja Location Service
///
/// A minimal REST API exposing CRUD operations and a geospatial "nearby"
/// lookup over a single ninja collection backed by MongoDB.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route configuration
/// - `models`: the ninja document and its embedded GeoJSON point
/// - `db`: MongoDB access layer
/// - `error`: error taxonomy and its HTTP mapping
/// - `config`: environment configuration
/// - `openapi`: generated API documentation
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;

pub use config::Config;
pub use error::{AppError, Result};
