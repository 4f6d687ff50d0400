//! # Credential Issuance and Lookup
//!
//! ## Endpoints
//!
//! - `POST /v1/credentials` — Issue one credential (MINTER_ROLE, not paused).
//! - `POST /v1/credentials/batch` — Issue one credential per recipient, all or nothing.
//! - `GET /v1/credentials/:id` — Full record including lock status.
//! - `GET /v1/credentials/:id/owner` — Owner of a credential.
//! - `GET /v1/accounts/:account/credentials` — Credentials held by an account.
//!
//! Lookups remain available while issuance is paused.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sbt_core::{AccountId, CredentialId};

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{extract_json, parse_path};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for single issuance.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MintRequest {
    /// Recipient account.
    #[schema(value_type = String, example = "0x00000000000000000000000000000000000000b0")]
    pub to: AccountId,
    /// Opaque metadata reference.
    pub uri: String,
}

/// Response from single issuance.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MintResponse {
    #[schema(value_type = u64)]
    pub id: CredentialId,
}

/// Request body for batch issuance. `to` and `uris` pair up by position.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchMintRequest {
    #[schema(value_type = Vec<String>)]
    pub to: Vec<AccountId>,
    pub uris: Vec<String>,
}

/// Response from batch issuance, ids in request order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchMintResponse {
    #[schema(value_type = Vec<u64>)]
    pub ids: Vec<CredentialId>,
}

/// A credential as returned by lookups.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CredentialResponse {
    #[schema(value_type = u64)]
    pub id: CredentialId,
    #[schema(value_type = String)]
    pub owner: AccountId,
    pub uri: String,
    /// Always true: issued credentials can never move.
    pub locked: bool,
}

/// Owner lookup response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerResponse {
    #[schema(value_type = String)]
    pub owner: AccountId,
}

/// Holder lookup response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HoldingsResponse {
    #[schema(value_type = String)]
    pub account: AccountId,
    pub balance: u64,
    #[schema(value_type = Vec<u64>)]
    pub credentials: Vec<CredentialId>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the credentials router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/credentials", post(mint_credential))
        .route("/v1/credentials/batch", post(batch_mint_credentials))
        .route("/v1/credentials/:id", get(get_credential))
        .route("/v1/credentials/:id/owner", get(owner_of))
        .route("/v1/accounts/:account/credentials", get(holdings))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/credentials — Issue one credential.
#[utoipa::path(
    post,
    path = "/v1/credentials",
    request_body = MintRequest,
    responses(
        (status = 201, description = "Credential issued", body = MintResponse),
        (status = 403, description = "Caller lacks MINTER_ROLE", body = crate::error::ErrorBody),
        (status = 409, description = "Issuance paused", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub(crate) async fn mint_credential(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<MintRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MintResponse>), AppError> {
    let req = extract_json(body)?;
    let id = state.transact(|service| service.mint_credential(caller.account, req.to, req.uri))?;
    Ok((StatusCode::CREATED, Json(MintResponse { id })))
}

/// POST /v1/credentials/batch — Issue credentials to several recipients.
#[utoipa::path(
    post,
    path = "/v1/credentials/batch",
    request_body = BatchMintRequest,
    responses(
        (status = 201, description = "All credentials issued", body = BatchMintResponse),
        (status = 403, description = "Caller lacks MINTER_ROLE", body = crate::error::ErrorBody),
        (status = 409, description = "Issuance paused", body = crate::error::ErrorBody),
        (status = 422, description = "Recipient and URI counts differ", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub(crate) async fn batch_mint_credentials(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<BatchMintRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BatchMintResponse>), AppError> {
    let req = extract_json(body)?;
    let ids = state.transact(|service| {
        service.batch_mint_credentials(caller.account, &req.to, &req.uris)
    })?;
    Ok((StatusCode::CREATED, Json(BatchMintResponse { ids })))
}

/// GET /v1/credentials/:id — Look up a credential.
#[utoipa::path(
    get,
    path = "/v1/credentials/{id}",
    params(("id" = u64, Path, description = "Credential ID")),
    responses(
        (status = 200, description = "Credential found", body = CredentialResponse),
        (status = 404, description = "Credential not issued", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub(crate) async fn get_credential(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CredentialResponse>, AppError> {
    let id: CredentialId = parse_path(&raw_id)?;
    let response = state.read(|ledger| {
        let credential = ledger.credential(id)?;
        Ok::<_, AppError>(CredentialResponse {
            id: credential.id,
            owner: credential.owner,
            uri: credential.uri.clone(),
            locked: ledger.locked(id)?,
        })
    })?;
    Ok(Json(response))
}

/// GET /v1/credentials/:id/owner — Owner of a credential.
#[utoipa::path(
    get,
    path = "/v1/credentials/{id}/owner",
    params(("id" = u64, Path, description = "Credential ID")),
    responses(
        (status = 200, description = "Owner found", body = OwnerResponse),
        (status = 404, description = "Credential not issued", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub(crate) async fn owner_of(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<OwnerResponse>, AppError> {
    let id: CredentialId = parse_path(&raw_id)?;
    let owner = state.read(|ledger| ledger.owner_of(id))?;
    Ok(Json(OwnerResponse { owner }))
}

/// GET /v1/accounts/:account/credentials — Credentials bound to an account.
#[utoipa::path(
    get,
    path = "/v1/accounts/{account}/credentials",
    params(("account" = String, Path, description = "Account (0x + 40 hex digits)")),
    responses(
        (status = 200, description = "Holdings", body = HoldingsResponse),
        (status = 422, description = "Malformed account", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub(crate) async fn holdings(
    State(state): State<AppState>,
    Path(raw_account): Path<String>,
) -> Result<Json<HoldingsResponse>, AppError> {
    let account: AccountId = parse_path(&raw_account)?;
    let response = state.read(|ledger| HoldingsResponse {
        account,
        balance: ledger.balance_of(account),
        credentials: ledger.credentials_of(account),
    });
    Ok(Json(response))
}
