//! # Request Extraction Helpers
//!
//! Maps body and path parsing failures onto [`AppError`] so every rejection
//! carries the structured error body.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Parse a raw path segment into an identifier.
///
/// Identifier parse failures surface as [`AppError::Validation`].
pub fn parse_path<T>(raw: &str) -> Result<T, AppError>
where
    T: FromStr<Err = sbt_core::ValidationError>,
{
    raw.parse::<T>().map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbt_core::{AccountId, CredentialId, RoleId};

    #[test]
    fn parse_path_accepts_identifiers() {
        assert_eq!(parse_path::<CredentialId>("7").unwrap(), CredentialId::new(7));
        assert_eq!(parse_path::<RoleId>("MINTER_ROLE").unwrap(), RoleId::minter());
        assert!(parse_path::<AccountId>("0x0000000000000000000000000000000000000000")
            .unwrap()
            .is_zero());
    }

    #[test]
    fn parse_path_rejects_garbage() {
        assert!(matches!(
            parse_path::<CredentialId>("seven"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_path::<AccountId>("0x12"),
            Err(AppError::Validation(_))
        ));
    }
}
