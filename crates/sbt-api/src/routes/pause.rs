//! # Pause Switch
//!
//! - `GET /v1/pause` — Current operating state.
//! - `POST /v1/pause` — Block issuance (PAUSER_ROLE).
//! - `POST /v1/unpause` — Resume issuance (PAUSER_ROLE).

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sbt_state::OperatingState;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Operating state of the circuit breaker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PauseResponse {
    pub paused: bool,
    /// `ACTIVE` or `PAUSED`.
    #[schema(value_type = String)]
    pub state: OperatingState,
}

/// Build the pause router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/pause", get(pause_status).post(pause))
        .route("/v1/unpause", post(unpause))
}

fn status(state: &AppState) -> PauseResponse {
    state.read(|ledger| PauseResponse {
        paused: ledger.is_paused(),
        state: ledger.operating_state(),
    })
}

/// GET /v1/pause — Current operating state.
#[utoipa::path(
    get,
    path = "/v1/pause",
    responses((status = 200, description = "Operating state", body = PauseResponse)),
    tag = "pause"
)]
pub(crate) async fn pause_status(State(state): State<AppState>) -> Json<PauseResponse> {
    Json(status(&state))
}

/// POST /v1/pause — Engage the circuit breaker.
#[utoipa::path(
    post,
    path = "/v1/pause",
    responses(
        (status = 200, description = "Issuance paused", body = PauseResponse),
        (status = 403, description = "Caller lacks PAUSER_ROLE", body = crate::error::ErrorBody),
        (status = 409, description = "Already paused", body = crate::error::ErrorBody),
    ),
    tag = "pause"
)]
pub(crate) async fn pause(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<PauseResponse>, AppError> {
    state.transact(|service| service.pause(caller.account))?;
    Ok(Json(status(&state)))
}

/// POST /v1/unpause — Release the circuit breaker.
#[utoipa::path(
    post,
    path = "/v1/unpause",
    responses(
        (status = 200, description = "Issuance resumed", body = PauseResponse),
        (status = 403, description = "Caller lacks PAUSER_ROLE", body = crate::error::ErrorBody),
        (status = 409, description = "Not paused", body = crate::error::ErrorBody),
    ),
    tag = "pause"
)]
pub(crate) async fn unpause(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<PauseResponse>, AppError> {
    state.transact(|service| service.unpause(caller.account))?;
    Ok(Json(status(&state)))
}
