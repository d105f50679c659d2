//! # HTTP Server Module
//!
//! Axum server exposing the game catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/games` - Filtered, sorted, paginated game listing

pub mod config;
pub mod games_routes;
pub mod observability_routes;
pub mod response;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use response::{ErrorResponse, GamesResponse};
pub use server::HttpServer;
