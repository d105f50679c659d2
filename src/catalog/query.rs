//! # Catalog Query
//!
//! Composes the page query and the count query from one [`CompiledFilter`].

use super::compiler::{compile, CompiledFilter, SqlParam};
use super::criteria::{FilterCriteria, PageRequest, SortOrder};

/// Table holding the catalog
pub const GAME_TABLE: &str = "game";

/// Columns selected for a [`GameRecord`](super::model::GameRecord), in decode order
pub const GAME_COLUMNS: &str = "id::text AS id, title, image, price::float8 AS price, \
rating::float8 AS rating, age_rating::text AS age_rating, release_date::timestamptz AS release_date, \
developer, publisher, genres::text[] AS genres, platforms::text[] AS platforms";

/// A compiled filter together with its ordering and page
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    filter: CompiledFilter,
    sort: SortOrder,
    page: PageRequest,
}

impl CatalogQuery {
    pub fn new(filter: CompiledFilter, sort: SortOrder, page: PageRequest) -> Self {
        Self { filter, sort, page }
    }

    /// Compile criteria into a query
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self::new(compile(criteria), criteria.sort, criteria.page)
    }

    pub fn filter(&self) -> &CompiledFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Page query: predicate, ordering, then LIMIT and OFFSET as the last two placeholders
    pub fn fetch_sql(&self) -> String {
        let limit_slot = self.filter.next_slot();
        format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT ${} OFFSET ${}",
            GAME_COLUMNS,
            GAME_TABLE,
            self.filter.predicate(),
            self.sort.order_by(),
            limit_slot,
            limit_slot + 1
        )
    }

    pub fn fetch_params(&self) -> Vec<SqlParam> {
        let mut params = self.filter.params().to_vec();
        params.push(SqlParam::Int(self.page.limit()));
        params.push(SqlParam::Int(self.page.offset()));
        params
    }

    /// Count query: predicate only
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            GAME_TABLE,
            self.filter.predicate()
        )
    }

    pub fn count_params(&self) -> &[SqlParam] {
        self.filter.params()
    }
}
