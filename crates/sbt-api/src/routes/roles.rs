//! # Role Administration
//!
//! ## Endpoints
//!
//! - `GET /v1/roles/:role` — Administering role and bearers.
//! - `GET /v1/roles/:role/members/:account` — Membership check.
//! - `PUT /v1/roles/:role/members/:account` — Grant (caller must bear the admin role).
//! - `DELETE /v1/roles/:role/members/:account` — Revoke (caller must bear the admin role).
//! - `POST /v1/roles/:role/renounce` — Caller gives up a role it holds.
//!
//! `:role` accepts a role name (`MINTER_ROLE`) or `0x` + 64 hex digits.
//! Grant and revoke are idempotent; `changed` reports whether membership moved.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sbt_core::{AccountId, RoleId};

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::parse_path;
use crate::state::AppState;

/// Role description.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    #[schema(value_type = String)]
    pub role: RoleId,
    /// Well-known name, when the role is one of the built-in roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(value_type = String)]
    pub admin_role: RoleId,
    #[schema(value_type = Vec<String>)]
    pub members: Vec<AccountId>,
}

/// Membership check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    #[schema(value_type = String)]
    pub role: RoleId,
    #[schema(value_type = String)]
    pub account: AccountId,
    pub member: bool,
}

/// Outcome of a grant, revoke or renounce.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleChangeResponse {
    #[schema(value_type = String)]
    pub role: RoleId,
    #[schema(value_type = String)]
    pub account: AccountId,
    pub member: bool,
    /// Whether the call altered membership.
    pub changed: bool,
}

/// Build the roles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/roles/:role", get(get_role))
        .route(
            "/v1/roles/:role/members/:account",
            get(has_role).put(grant_role).delete(revoke_role),
        )
        .route("/v1/roles/:role/renounce", post(renounce_role))
}

fn parse_member_path(raw_role: &str, raw_account: &str) -> Result<(RoleId, AccountId), AppError> {
    Ok((parse_path(raw_role)?, parse_path(raw_account)?))
}

/// GET /v1/roles/:role — Describe a role.
#[utoipa::path(
    get,
    path = "/v1/roles/{role}",
    params(("role" = String, Path, description = "Role name or 0x-hex id")),
    responses(
        (status = 200, description = "Role description", body = RoleResponse),
        (status = 422, description = "Malformed role", body = crate::error::ErrorBody),
    ),
    tag = "roles"
)]
pub(crate) async fn get_role(
    State(state): State<AppState>,
    Path(raw_role): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let role: RoleId = parse_path(&raw_role)?;
    let response = state.read(|ledger| RoleResponse {
        role,
        name: role.well_known_name().map(str::to_string),
        admin_role: ledger.role_admin(role),
        members: ledger.role_members(role),
    });
    Ok(Json(response))
}

/// GET /v1/roles/:role/members/:account — Whether the account bears the role.
#[utoipa::path(
    get,
    path = "/v1/roles/{role}/members/{account}",
    params(
        ("role" = String, Path, description = "Role name or 0x-hex id"),
        ("account" = String, Path, description = "Account"),
    ),
    responses((status = 200, description = "Membership", body = MembershipResponse)),
    tag = "roles"
)]
pub(crate) async fn has_role(
    State(state): State<AppState>,
    Path((raw_role, raw_account)): Path<(String, String)>,
) -> Result<Json<MembershipResponse>, AppError> {
    let (role, account) = parse_member_path(&raw_role, &raw_account)?;
    let member = state.read(|ledger| ledger.has_role(role, account));
    Ok(Json(MembershipResponse {
        role,
        account,
        member,
    }))
}

/// PUT /v1/roles/:role/members/:account — Grant a role.
#[utoipa::path(
    put,
    path = "/v1/roles/{role}/members/{account}",
    params(
        ("role" = String, Path, description = "Role name or 0x-hex id"),
        ("account" = String, Path, description = "Account"),
    ),
    responses(
        (status = 200, description = "Role granted", body = RoleChangeResponse),
        (status = 403, description = "Caller lacks the administering role", body = crate::error::ErrorBody),
    ),
    tag = "roles"
)]
pub(crate) async fn grant_role(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((raw_role, raw_account)): Path<(String, String)>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    let (role, account) = parse_member_path(&raw_role, &raw_account)?;
    let changed = state.transact(|service| service.grant_role(caller.account, role, account))?;
    Ok(Json(RoleChangeResponse {
        role,
        account,
        member: true,
        changed,
    }))
}

/// DELETE /v1/roles/:role/members/:account — Revoke a role.
#[utoipa::path(
    delete,
    path = "/v1/roles/{role}/members/{account}",
    params(
        ("role" = String, Path, description = "Role name or 0x-hex id"),
        ("account" = String, Path, description = "Account"),
    ),
    responses(
        (status = 200, description = "Role revoked", body = RoleChangeResponse),
        (status = 403, description = "Caller lacks the administering role", body = crate::error::ErrorBody),
    ),
    tag = "roles"
)]
pub(crate) async fn revoke_role(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((raw_role, raw_account)): Path<(String, String)>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    let (role, account) = parse_member_path(&raw_role, &raw_account)?;
    let changed = state.transact(|service| service.revoke_role(caller.account, role, account))?;
    Ok(Json(RoleChangeResponse {
        role,
        account,
        member: false,
        changed,
    }))
}

/// POST /v1/roles/:role/renounce — Caller gives up a role.
#[utoipa::path(
    post,
    path = "/v1/roles/{role}/renounce",
    params(("role" = String, Path, description = "Role name or 0x-hex id")),
    responses((status = 200, description = "Role renounced", body = RoleChangeResponse)),
    tag = "roles"
)]
pub(crate) async fn renounce_role(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(raw_role): Path<String>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    let role: RoleId = parse_path(&raw_role)?;
    let account = caller.account;
    let changed = state.transact(|service| service.renounce_role(account, role, account))?;
    Ok(Json(RoleChangeResponse {
        role,
        account,
        member: false,
        changed,
    }))
}
