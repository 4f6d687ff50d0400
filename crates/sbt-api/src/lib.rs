//! # sbt-api — HTTP Service for the Soulbound Credential Ledger
//!
//! Exposes one in-memory [`CredentialLedger`](sbt_state::CredentialLedger)
//! over HTTP. Every mutating request is a single ledger transaction executed
//! under the state lock.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                    | Domain                 |
//! |------------------------|---------------------------|------------------------|
//! | `/v1/credentials/*`    | [`routes::credentials`]   | Issuance and lookups   |
//! | `/v1/accounts/*`       | [`routes::credentials`]   | Holder queries         |
//! | `/v1/roles/*`          | [`routes::roles`]         | Role administration    |
//! | `/v1/pause`, `/v1/unpause` | [`routes::pause`]     | Circuit breaker        |
//! | `/v1/transfers/*`, `/v1/approvals/*` | [`routes::transfers`] | Always refused |
//! | `/v1/ledger`, `/v1/events` | [`routes::ledger`]    | Summary and event feed |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and the transfer surface are mounted outside
/// the auth middleware: the soulbound refusal never depends on who calls.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    let api = Router::new()
        .merge(routes::credentials::router())
        .merge(routes::roles::router())
        .merge(routes::pause::router())
        .merge(routes::ledger::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .with_state(state.clone());

    let transfers = routes::transfers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(transfers).merge(api)
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The ledger is built before the router, so a running
/// server is always ready.
async fn readiness() -> &'static str {
    "ready"
}
