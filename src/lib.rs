//! game-catalog - filtered, sorted, paginated game listings over HTTP
//!
//! One read-only endpoint, `GET /games`, backed by PostgreSQL.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
