//! # Caller Authentication Middleware
//!
//! Resolves the account on whose behalf a request acts. The ledger makes
//! every authorization decision itself (role membership); this layer only
//! establishes who is calling.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {account}:{secret}   — secret checked against AUTH_TOKEN
//! Bearer {account}            — accepted only when AUTH_TOKEN is unset
//! ```
//!
//! With `AUTH_TOKEN` set, every `/v1` request must carry a valid token. With
//! it unset (development mode) the header is optional: requests without one
//! may still query, but mutating handlers reject them with 401 because they
//! require a [`CallerIdentity`].

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use sbt_core::AccountId;

use crate::error::AppError;

/// The account a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: AccountId,
}

/// Mutating handlers take a `CallerIdentity` argument; a request that
/// reached them anonymously is answered with 401.
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CallerIdentity>() {
            Some(identity) => Ok(*identity),
            None => Err(AppError::Unauthorized(
                "no caller identity in request context".into(),
            )),
        }
    }
}

/// Shared secret for caller tokens, carried as a request extension.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_some() { "[REDACTED]" } else { "<unset>" };
        f.debug_struct("AuthConfig").field("token", &token).finish()
    }
}

/// Compare secrets without leaking the position of the first difference.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    if provided.len() != expected.len() {
        // Dummy comparison of equal cost.
        let _ = expected.as_bytes().ct_eq(expected.as_bytes());
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Parse `{account}:{secret}` (or bare `{account}` when no secret is
/// expected) into a caller identity.
pub fn parse_bearer_token(
    provided: &str,
    expected_secret: Option<&str>,
) -> Result<CallerIdentity, String> {
    let (account, secret) = match provided.split_once(':') {
        Some((account, secret)) => (account, Some(secret)),
        None => (provided, None),
    };

    match (expected_secret, secret) {
        (None, _) => {}
        (Some(expected), Some(secret)) if constant_time_token_eq(secret, expected) => {}
        (Some(_), Some(_)) => return Err("invalid bearer token".into()),
        (Some(_), None) => {
            return Err("invalid token format, expected {account}:{secret}".into())
        }
    }

    account
        .parse::<AccountId>()
        .map(|account| CallerIdentity { account })
        .map_err(|e| format!("invalid caller account: {e}"))
}

/// Work out who is calling. `Ok(None)` is an anonymous development-mode
/// request.
fn resolve_caller(request: &Request) -> Result<Option<CallerIdentity>, String> {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|config| config.token.as_deref());

    let Some(value) = request.headers().get(AUTHORIZATION) else {
        return match expected {
            Some(_) => Err("missing authorization header".into()),
            None => Ok(None),
        };
    };
    let value = value
        .to_str()
        .map_err(|_| "authorization header is not valid ASCII".to_string())?;
    let provided = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| "authorization header must use Bearer scheme".to_string())?;
    parse_bearer_token(provided, expected).map(Some)
}

/// Resolve the caller and attach a [`CallerIdentity`] to the request.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    match resolve_caller(&request) {
        Ok(Some(identity)) => {
            tracing::debug!(caller = %identity.account, "caller resolved");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(%reason, "authentication failed");
            AppError::Unauthorized(reason).into_response()
        }
    }
}
