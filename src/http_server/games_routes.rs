//! Catalog HTTP Routes
//!
//! `GET /games` lists one page of games matching the query string.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::catalog::{CatalogError, CatalogService, GameStore};
use crate::observability::{log_event_with_fields, Event};

use super::response::GamesResponse;

/// Shared state type
type GamesState<S> = Arc<CatalogService<S>>;

/// Create catalog routes
pub fn games_routes<S: GameStore + 'static>(service: CatalogService<S>) -> Router {
    Router::new()
        .route("/games", get(list_games_handler::<S>))
        .with_state(Arc::new(service))
}

/// List games handler
async fn list_games_handler<S: GameStore + 'static>(
    State(service): State<GamesState<S>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<GamesResponse>, CatalogError> {
    match service.list_games_from_params(&query).await {
        Ok(result) => Ok(Json(GamesResponse::from(result))),
        Err(err) => {
            report_failure(&err);
            Err(err)
        }
    }
}

/// Log a failed request with its status and full detail
fn report_failure(err: &CatalogError) {
    let status = err.status_code().as_u16().to_string();
    let detail = err.to_string();
    let event = if err.is_client_error() {
        Event::QueryRejected
    } else {
        Event::QueryFailed
    };
    log_event_with_fields(event, &[("status", status.as_str()), ("message", detail.as_str())]);
}
