//! # Transfer and Approval Endpoints
//!
//! Present so that wallets and indexers probing the usual token surface get
//! an explicit, typed refusal instead of a 404.
//!
//! - `POST /v1/transfers`
//! - `POST /v1/transfers/safe`
//! - `POST /v1/approvals`
//! - `POST /v1/approvals/operators`
//!
//! Every call is delegated to the non-transferable [`TransferGuard`], which
//! refuses with `SOULBOUND_VIOLATION` (403). The refusal does not depend on
//! the body: a malformed or empty body is treated as the all-zero request.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use sbt_core::{AccountId, CredentialId};
use sbt_state::{CredentialError, TokenCapability, TransferGuard};

use crate::error::AppError;
use crate::state::AppState;

/// Transfer request shape.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TransferRequest {
    #[schema(value_type = String)]
    pub from: AccountId,
    #[schema(value_type = String)]
    pub to: AccountId,
    #[schema(value_type = u64)]
    pub id: CredentialId,
    /// Receiver payload for safe transfers.
    #[serde(default)]
    pub data: String,
}

/// Single-credential approval request shape.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApprovalRequest {
    #[schema(value_type = String)]
    pub spender: AccountId,
    #[schema(value_type = u64)]
    pub id: CredentialId,
}

/// Operator approval request shape.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OperatorApprovalRequest {
    #[schema(value_type = String)]
    pub operator: AccountId,
    pub enabled: bool,
}

/// Build the transfers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/transfers", post(transfer))
        .route("/v1/transfers/safe", post(safe_transfer))
        .route("/v1/approvals", post(approve))
        .route("/v1/approvals/operators", post(set_approval_for_all))
}

fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    body.map(|Json(req)| req).unwrap_or_default()
}

fn respond(result: Result<(), CredentialError>) -> Result<StatusCode, AppError> {
    result.map(|()| StatusCode::NO_CONTENT).map_err(AppError::from)
}

/// POST /v1/transfers — Always refused.
#[utoipa::path(
    post,
    path = "/v1/transfers",
    request_body = TransferRequest,
    responses((status = 403, description = "Credentials are soulbound", body = crate::error::ErrorBody)),
    tag = "transfers"
)]
pub(crate) async fn transfer(
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = body_or_default(body);
    respond(TransferGuard.transfer(req.from, req.to, req.id))
}

/// POST /v1/transfers/safe — Always refused.
#[utoipa::path(
    post,
    path = "/v1/transfers/safe",
    request_body = TransferRequest,
    responses((status = 403, description = "Credentials are soulbound", body = crate::error::ErrorBody)),
    tag = "transfers"
)]
pub(crate) async fn safe_transfer(
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = body_or_default(body);
    respond(TransferGuard.safe_transfer(req.from, req.to, req.id, req.data.as_bytes()))
}

/// POST /v1/approvals — Always refused.
#[utoipa::path(
    post,
    path = "/v1/approvals",
    request_body = ApprovalRequest,
    responses((status = 403, description = "Credentials are soulbound", body = crate::error::ErrorBody)),
    tag = "transfers"
)]
pub(crate) async fn approve(
    body: Result<Json<ApprovalRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = body_or_default(body);
    respond(TransferGuard.approve(req.spender, req.id))
}

/// POST /v1/approvals/operators — Always refused.
#[utoipa::path(
    post,
    path = "/v1/approvals/operators",
    request_body = OperatorApprovalRequest,
    responses((status = 403, description = "Credentials are soulbound", body = crate::error::ErrorBody)),
    tag = "transfers"
)]
pub(crate) async fn set_approval_for_all(
    body: Result<Json<OperatorApprovalRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = body_or_default(body);
    respond(TransferGuard.set_approval_for_all(req.operator, req.enabled))
}
