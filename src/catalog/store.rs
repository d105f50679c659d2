//! # Game Store
//!
//! Read-only query capability the catalog runs against.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::CatalogResult;
use super::model::GameRecord;
use super::query::CatalogQuery;

/// Store trait for catalog reads
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Rows of the requested page, ordered by the query's sort
    async fn fetch_page(&self, query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>>;

    /// Number of rows matching the query's filter, ignoring pagination
    async fn count(&self, query: &CatalogQuery) -> CatalogResult<i64>;
}

#[async_trait]
impl<S: GameStore + ?Sized> GameStore for Arc<S> {
    async fn fetch_page(&self, query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
        (**self).fetch_page(query).await
    }

    async fn count(&self, query: &CatalogQuery) -> CatalogResult<i64> {
        (**self).count(query).await
    }
}

/// In-memory store over a fixed set of records.
///
/// Evaluates the same compiled conditions the SQL store renders, in insertion
/// order before sorting.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: Vec<GameRecord>,
    accesses: AtomicUsize,
}

impl InMemoryGameStore {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self {
            games,
            accesses: AtomicUsize::new(0),
        }
    }

    /// Number of fetch and count calls served so far
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn matching<'a>(&'a self, query: &'a CatalogQuery) -> impl Iterator<Item = &'a GameRecord> + 'a {
        self.games.iter().filter(move |g| query.filter().matches(g))
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn fetch_page(&self, query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
        self.accesses.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<GameRecord> = self.matching(query).cloned().collect();
        let sort = query.sort();
        rows.sort_by(|a, b| sort.compare(a, b));

        let page = query.page();
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count(&self, query: &CatalogQuery) -> CatalogResult<i64> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        Ok(self.matching(query).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::criteria::{FilterCriteria, SortOrder};
    use crate::catalog::model::AgeRating;
    use chrono::{TimeZone, Utc};

    fn game(id: &str, price: f64, year: i32) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            title: format!("Game {}", id),
            image: String::new(),
            price,
            rating: 4.0,
            age_rating: AgeRating::T,
            release_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            developer: "Studio".to_string(),
            publisher: "Publisher".to_string(),
            genres: vec!["Action".to_string()],
            platforms: vec!["PC".to_string()],
        }
    }

    fn create_test_store() -> InMemoryGameStore {
        InMemoryGameStore::new(vec![
            game("a", 30.0, 2010),
            game("b", 10.0, 2020),
            game("c", 20.0, 2015),
        ])
    }

    #[tokio::test]
    async fn test_fetch_sorted_page() {
        let store = create_test_store();
        let criteria = FilterCriteria::new()
            .with_sort(SortOrder::LowPrice)
            .with_page(1, 2);
        let rows = store
            .fetch_page(&CatalogQuery::from_criteria(&criteria))
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_count_ignores_page() {
        let store = create_test_store();
        let criteria = FilterCriteria::new().with_page(2, 2);
        let query = CatalogQuery::from_criteria(&criteria);

        assert_eq!(store.count(&query).await.unwrap(), 3);
        assert_eq!(store.fetch_page(&query).await.unwrap().len(), 1);
        assert_eq!(store.access_count(), 2);
    }

    #[tokio::test]
    async fn test_newest_first_by_default() {
        let store = create_test_store();
        let rows = store
            .fetch_page(&CatalogQuery::from_criteria(&FilterCriteria::new()))
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
