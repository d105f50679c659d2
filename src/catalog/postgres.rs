//! # PostgreSQL Store
//!
//! Runs catalog queries through a `sqlx` connection pool.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use super::compiler::SqlParam;
use super::errors::{CatalogError, CatalogResult};
use super::model::{AgeRating, GameRecord};
use super::query::CatalogQuery;
use super::store::GameStore;

/// Catalog store backed by a PostgreSQL `game` table
#[derive(Debug, Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> CatalogResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Bind parameters in placeholder order
fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
            SqlParam::TextList(v) => query.bind(v.as_slice()),
        };
    }
    query
}

/// Decode one row selected with `GAME_COLUMNS`
fn decode_game(row: &PgRow) -> CatalogResult<GameRecord> {
    let age_rating: String = row.try_get("age_rating")?;
    let age_rating = age_rating
        .parse::<AgeRating>()
        .map_err(CatalogError::Decode)?;
    let release_date: DateTime<Utc> = row.try_get("release_date")?;

    Ok(GameRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        price: row.try_get("price")?,
        rating: row.try_get("rating")?,
        age_rating,
        release_date,
        developer: row.try_get("developer")?,
        publisher: row.try_get("publisher")?,
        genres: row.try_get("genres")?,
        platforms: row.try_get("platforms")?,
    })
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn fetch_page(&self, query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
        let sql = query.fetch_sql();
        let params = query.fetch_params();

        let rows = bind_params(sqlx::query(&sql), &params)
            .fetch_all(&self.pool)
            .await?;

        // One bad row fails the whole page.
        rows.iter().map(decode_game).collect()
    }

    async fn count(&self, query: &CatalogQuery) -> CatalogResult<i64> {
        let sql = query.count_sql();

        let row = bind_params(sqlx::query(&sql), query.count_params())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get::<i64, _>(0)?)
    }
}
