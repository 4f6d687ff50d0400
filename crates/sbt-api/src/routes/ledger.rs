//! # Ledger Summary and Event Feed
//!
//! - `GET /v1/ledger` — Collection metadata, supply, pause flag, state digest.
//! - `GET /v1/events?since=N` — Committed events with sequence greater than `N`.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use sbt_state::LedgerEvent;

use crate::error::AppError;
use crate::state::AppState;

/// Ledger summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LedgerSummary {
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
    pub paused: bool,
    /// `sha256:<hex>` over the canonical ledger.
    pub digest: String,
}

/// Event feed query.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EventsQuery {
    /// Return events after this sequence number (default 0).
    #[serde(default)]
    pub since: u64,
}

/// Event feed page.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventsResponse {
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<LedgerEvent>,
    /// Sequence number of the last returned event, or `since` if none.
    pub cursor: u64,
}

/// Build the ledger router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/ledger", get(ledger_summary))
        .route("/v1/events", get(events))
}

/// GET /v1/ledger — Ledger summary.
#[utoipa::path(
    get,
    path = "/v1/ledger",
    responses((status = 200, description = "Ledger summary", body = LedgerSummary)),
    tag = "ledger"
)]
pub(crate) async fn ledger_summary(
    State(state): State<AppState>,
) -> Result<Json<LedgerSummary>, AppError> {
    let summary = state.read(|ledger| {
        Ok::<_, AppError>(LedgerSummary {
            name: ledger.name().to_string(),
            symbol: ledger.symbol().to_string(),
            total_supply: ledger.total_supply(),
            paused: ledger.is_paused(),
            digest: ledger.state_digest()?.to_string(),
        })
    })?;
    Ok(Json(summary))
}

/// GET /v1/events — Committed events after a sequence number.
#[utoipa::path(
    get,
    path = "/v1/events",
    params(EventsQuery),
    responses((status = 200, description = "Events", body = EventsResponse)),
    tag = "ledger"
)]
pub(crate) async fn events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let events = state.read(|ledger| ledger.events_since(query.since).to_vec());
    let cursor = events.last().map_or(query.since, |event| event.sequence);
    Json(EventsResponse { events, cursor })
}
