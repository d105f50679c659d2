//! # Catalog Service
//!
//! Runs the page and count queries for one request and assembles the result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::criteria::FilterCriteria;
use super::errors::{CatalogError, CatalogResult};
use super::model::PagedResult;
use super::params::parse_criteria;
use super::query::CatalogQuery;
use super::store::GameStore;
use crate::observability::ObservationScope;

/// Default overall deadline for one request
pub const DEFAULT_QUERY_DEADLINE: Duration = Duration::from_secs(5);

/// Catalog query service over a shared store
pub struct CatalogService<S: GameStore> {
    store: Arc<S>,
    deadline: Duration,
}

impl<S: GameStore> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            deadline: self.deadline,
        }
    }
}

impl<S: GameStore> CatalogService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_deadline(store, DEFAULT_QUERY_DEADLINE)
    }

    pub fn with_deadline(store: Arc<S>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// List one page of games matching `criteria`.
    ///
    /// Page and count run concurrently under one deadline. The first failure
    /// cancels the other query; no partial result is ever returned.
    pub async fn list_games(&self, criteria: &FilterCriteria) -> CatalogResult<PagedResult> {
        let query = CatalogQuery::from_criteria(criteria);
        let scope = ObservationScope::with_fields(
            "CATALOG_QUERY",
            &[
                ("sort", query.sort().to_string()),
                ("page", query.page().page().to_string()),
                ("per_page", query.page().per_page().to_string()),
                ("conditions", query.filter().conditions().len().to_string()),
            ],
        );

        let work = async {
            tokio::try_join!(self.store.fetch_page(&query), self.store.count(&query))
        };

        let (items, total) = match tokio::time::timeout(self.deadline, work).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                scope.fail(&err.to_string());
                return Err(err);
            }
            Err(_) => {
                let err = CatalogError::DeadlineExceeded(self.deadline.as_millis() as u64);
                scope.fail(&err.to_string());
                return Err(err);
            }
        };

        scope.complete_with_fields(&[
            ("returned", items.len().to_string()),
            ("total", total.to_string()),
        ]);

        Ok(PagedResult::new(items, total))
    }

    /// Validate raw query parameters, then list games.
    ///
    /// Invalid input is rejected before the store is touched.
    pub async fn list_games_from_params(
        &self,
        raw: &HashMap<String, String>,
    ) -> CatalogResult<PagedResult> {
        let criteria = parse_criteria(raw)?;
        self.list_games(&criteria).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{AgeRating, GameRecord};
    use crate::catalog::store::InMemoryGameStore;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn game(id: &str, price: f64) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            image: String::new(),
            price,
            rating: 3.5,
            age_rating: AgeRating::E,
            release_date: Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
            developer: "Dev".to_string(),
            publisher: "Pub".to_string(),
            genres: vec![],
            platforms: vec![],
        }
    }

    /// Store whose count query never finishes
    struct StalledStore;

    #[async_trait]
    impl GameStore for StalledStore {
        async fn fetch_page(&self, _query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
            Ok(Vec::new())
        }

        async fn count(&self, _query: &CatalogQuery) -> CatalogResult<i64> {
            std::future::pending().await
        }
    }

    /// Store whose page query fails
    struct BrokenStore;

    #[async_trait]
    impl GameStore for BrokenStore {
        async fn fetch_page(&self, _query: &CatalogQuery) -> CatalogResult<Vec<GameRecord>> {
            Err(CatalogError::Decode("unknown age rating 'X'".to_string()))
        }

        async fn count(&self, _query: &CatalogQuery) -> CatalogResult<i64> {
            Ok(3)
        }
    }

    #[tokio::test]
    async fn test_list_games() {
        let store = Arc::new(InMemoryGameStore::new(vec![game("a", 5.0), game("b", 15.0)]));
        let service = CatalogService::new(Arc::clone(&store));

        let result = service.list_games(&FilterCriteria::default()).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.items.len(), 2);
        assert_eq!(store.access_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_has_items() {
        let service = CatalogService::new(Arc::new(InMemoryGameStore::default()));

        let result = service.list_games(&FilterCriteria::default()).await.unwrap();
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_params_skip_store() {
        let store = Arc::new(InMemoryGameStore::new(vec![game("a", 5.0)]));
        let service = CatalogService::new(Arc::clone(&store));

        let mut raw = HashMap::new();
        raw.insert("sort".to_string(), "INVALID_VALUE".to_string());

        let err = service.list_games_from_params(&raw).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(store.access_count(), 0);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let service =
            CatalogService::with_deadline(Arc::new(StalledStore), Duration::from_millis(20));

        let err = service.list_games(&FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::DeadlineExceeded(20)));
    }

    #[tokio::test]
    async fn test_store_failure_returns_no_partial_result() {
        let service = CatalogService::new(Arc::new(BrokenStore));

        let err = service.list_games(&FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(!err.is_client_error());
    }
}
