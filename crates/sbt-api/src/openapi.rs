//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Soulbound Credential Ledger API",
        version = "0.1.0",
        description = "Issuance, role administration and pause control for non-transferable credentials.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Credentials
        crate::routes::credentials::mint_credential,
        crate::routes::credentials::batch_mint_credentials,
        crate::routes::credentials::get_credential,
        crate::routes::credentials::owner_of,
        crate::routes::credentials::holdings,
        // Roles
        crate::routes::roles::get_role,
        crate::routes::roles::has_role,
        crate::routes::roles::grant_role,
        crate::routes::roles::revoke_role,
        crate::routes::roles::renounce_role,
        // Pause
        crate::routes::pause::pause_status,
        crate::routes::pause::pause,
        crate::routes::pause::unpause,
        // Transfers
        crate::routes::transfers::transfer,
        crate::routes::transfers::safe_transfer,
        crate::routes::transfers::approve,
        crate::routes::transfers::set_approval_for_all,
        // Ledger
        crate::routes::ledger::ledger_summary,
        crate::routes::ledger::events,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::credentials::MintRequest,
        crate::routes::credentials::MintResponse,
        crate::routes::credentials::BatchMintRequest,
        crate::routes::credentials::BatchMintResponse,
        crate::routes::credentials::CredentialResponse,
        crate::routes::credentials::OwnerResponse,
        crate::routes::credentials::HoldingsResponse,
        crate::routes::roles::RoleResponse,
        crate::routes::roles::MembershipResponse,
        crate::routes::roles::RoleChangeResponse,
        crate::routes::pause::PauseResponse,
        crate::routes::transfers::TransferRequest,
        crate::routes::transfers::ApprovalRequest,
        crate::routes::transfers::OperatorApprovalRequest,
        crate::routes::ledger::LedgerSummary,
        crate::routes::ledger::EventsResponse,
    )),
    tags(
        (name = "credentials", description = "Credential issuance and lookup"),
        (name = "roles", description = "Role administration"),
        (name = "pause", description = "Issuance circuit breaker"),
        (name = "transfers", description = "Transfer surface (always refused)"),
        (name = "ledger", description = "Ledger summary and event feed"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_route() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        for expected in [
            "/v1/credentials",
            "/v1/credentials/batch",
            "/v1/credentials/{id}",
            "/v1/roles/{role}/members/{account}",
            "/v1/pause",
            "/v1/transfers",
            "/v1/events",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
