//! # Identifier Newtypes
//!
//! Newtype wrappers for the three identifier namespaces of the ledger. They
//! prevent accidental confusion: a `RoleId` cannot be passed where an
//! `AccountId` is expected.
//!
//! - [`AccountId`] — 20-byte account, rendered `0x` + 40 hex digits.
//! - [`RoleId`] — 32-byte fixed-width role hash. Named roles hash their name
//!   with SHA-256; the root administrator role is all zeros.
//! - [`CredentialId`] — unsigned integer allocated by the credential registry.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Name of the root administrator role.
pub const DEFAULT_ADMIN_ROLE_NAME: &str = "DEFAULT_ADMIN_ROLE";
/// Name of the role allowed to issue credentials.
pub const MINTER_ROLE_NAME: &str = "MINTER_ROLE";
/// Name of the role allowed to operate the pause switch.
pub const PAUSER_ROLE_NAME: &str = "PAUSER_ROLE";

// ─── AccountId ──────────────────────────────────────────────────────

/// A 20-byte account identifier supplied by the execution substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// The zero-valued account.
    pub const ZERO: AccountId = AccountId([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero-valued account.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", encode_hex(&self.0))
    }
}

impl FromStr for AccountId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_prefixed_hex::<20>(s)
            .map(Self)
            .map_err(|reason| ValidationError::InvalidAccountId {
                input: s.to_string(),
                reason,
            })
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── RoleId ─────────────────────────────────────────────────────────

/// A 32-byte role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleId([u8; 32]);

impl RoleId {
    /// The root administrator role. It administers itself.
    pub const DEFAULT_ADMIN: RoleId = RoleId([0u8; 32]);

    /// Derive a role identifier from its name (SHA-256 of the UTF-8 bytes).
    pub fn from_name(name: &str) -> Self {
        if name == DEFAULT_ADMIN_ROLE_NAME {
            return Self::DEFAULT_ADMIN;
        }
        let hash = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// The credential issuance role.
    pub fn minter() -> Self {
        Self::from_name(MINTER_ROLE_NAME)
    }

    /// The pause switch operator role.
    pub fn pauser() -> Self {
        Self::from_name(PAUSER_ROLE_NAME)
    }

    /// Wrap raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Name of a well-known role, if this is one.
    pub fn well_known_name(&self) -> Option<&'static str> {
        if *self == Self::DEFAULT_ADMIN {
            Some(DEFAULT_ADMIN_ROLE_NAME)
        } else if *self == Self::minter() {
            Some(MINTER_ROLE_NAME)
        } else if *self == Self::pauser() {
            Some(PAUSER_ROLE_NAME)
        } else {
            None
        }
    }

    /// Human-oriented label: the well-known name, or the hex form.
    pub fn label(&self) -> String {
        self.well_known_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", encode_hex(&self.0))
    }
}

/// Parses either `0x` + 64 hex digits, or a role name made of ASCII
/// upper-case letters, digits and underscores (`MINTER_ROLE`).
impl FromStr for RoleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            return decode_prefixed_hex::<32>(s)
                .map(Self)
                .map_err(|reason| ValidationError::InvalidRoleId {
                    input: s.to_string(),
                    reason,
                });
        }
        let is_name = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if is_name {
            Ok(Self::from_name(s))
        } else {
            Err(ValidationError::InvalidRoleId {
                input: s.to_string(),
                reason: "expected 0x-prefixed 32-byte hex or an upper-case role name".to_string(),
            })
        }
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── CredentialId ───────────────────────────────────────────────────

/// Identifier of an issued credential. Allocated ids start at 1, so the
/// default value 0 never names an issued credential.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CredentialId(u64);

impl CredentialId {
    /// Wrap a raw value. Any value is representable; only the registry
    /// decides which ids exist.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CredentialId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CredentialId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidCredentialId(s.to_string()))
    }
}

// ─── Hex helpers ────────────────────────────────────────────────────

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_prefixed_hex<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| "missing 0x prefix".to_string())?;
    if digits.len() != N * 2 {
        return Err(format!(
            "expected {} hex digits, got {}",
            N * 2,
            digits.len()
        ));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit {bad:?}"));
    }
    let mut out = [0u8; N];
    for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).map_err(|_| "non-ASCII input".to_string())?;
        out[i] = u8::from_str_radix(pair, 16)
            .map_err(|_| format!("invalid hex digit pair {pair:?}"))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x00000000000000000000000000000000000a11ce";

    #[test]
    fn test_account_id_roundtrip() {
        let id: AccountId = ALICE.parse().unwrap();
        assert_eq!(id.to_string(), ALICE);
        assert!(!id.is_zero());
    }

    #[test]
    fn test_account_id_uppercase_hex_normalized() {
        let id: AccountId = "0x00000000000000000000000000000000000A11CE".parse().unwrap();
        assert_eq!(id.to_string(), ALICE);
    }

    #[test]
    fn test_account_id_rejects_short_input() {
        let err = "0x1234".parse::<AccountId>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAccountId { .. }));
    }

    #[test]
    fn test_account_id_rejects_missing_prefix() {
        assert!("00000000000000000000000000000000000a11ce"
            .parse::<AccountId>()
            .is_err());
    }

    #[test]
    fn test_account_id_rejects_non_hex() {
        assert!("0x0000000000000000000000000000000000zzzzzz"
            .parse::<AccountId>()
            .is_err());
    }

    #[test]
    fn test_zero_account() {
        let zero: AccountId = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert_eq!(zero, AccountId::ZERO);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_account_id_serde_as_string() {
        let id: AccountId = ALICE.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{ALICE}\""));
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_default_admin_is_zero() {
        assert_eq!(RoleId::DEFAULT_ADMIN.as_bytes(), &[0u8; 32]);
        assert_eq!(RoleId::from_name("DEFAULT_ADMIN_ROLE"), RoleId::DEFAULT_ADMIN);
    }

    #[test]
    fn test_named_roles_are_distinct() {
        assert_ne!(RoleId::minter(), RoleId::pauser());
        assert_ne!(RoleId::minter(), RoleId::DEFAULT_ADMIN);
    }

    #[test]
    fn test_role_parse_by_name_and_hex() {
        let by_name: RoleId = "MINTER_ROLE".parse().unwrap();
        assert_eq!(by_name, RoleId::minter());
        let by_hex: RoleId = by_name.to_string().parse().unwrap();
        assert_eq!(by_hex, by_name);
    }

    #[test]
    fn test_role_parse_rejects_lowercase_name() {
        assert!("minter".parse::<RoleId>().is_err());
        assert!("".parse::<RoleId>().is_err());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(RoleId::minter().label(), "MINTER_ROLE");
        assert_eq!(RoleId::pauser().label(), "PAUSER_ROLE");
        assert_eq!(RoleId::DEFAULT_ADMIN.label(), "DEFAULT_ADMIN_ROLE");
        let custom = RoleId::from_name("AUDITOR_ROLE");
        assert!(custom.label().starts_with("0x"));
    }

    #[test]
    fn test_credential_id_parse() {
        assert_eq!("42".parse::<CredentialId>().unwrap(), CredentialId::new(42));
        assert_eq!("0".parse::<CredentialId>().unwrap().value(), 0);
        assert!("-1".parse::<CredentialId>().is_err());
        assert!("abc".parse::<CredentialId>().is_err());
    }

    #[test]
    fn test_credential_id_serde_transparent() {
        let json = serde_json::to_string(&CredentialId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
