//! # Catalog Module
//!
//! Filtered, sorted, paginated listing of game records.
//!
//! Request flow: raw parameters are validated into [`FilterCriteria`], the
//! criteria compile into one predicate, and that predicate drives both the
//! page query and the count query against a [`GameStore`].

pub mod compiler;
pub mod criteria;
pub mod errors;
pub mod model;
pub mod params;
pub mod postgres;
pub mod query;
pub mod service;
pub mod store;

pub use compiler::{compile, CompiledFilter, Condition, SqlParam, BASE_PREDICATE};
pub use criteria::{FilterCriteria, PageRequest, SortOrder};
pub use errors::{CatalogError, CatalogResult};
pub use model::{AgeRating, GameRecord, PagedResult};
pub use params::parse_criteria;
pub use postgres::PgGameStore;
pub use query::CatalogQuery;
pub use service::CatalogService;
pub use store::{GameStore, InMemoryGameStore};
