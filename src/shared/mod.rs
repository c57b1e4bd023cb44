//! Shared newtypes and utilities used across the toolkit.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the node sends, so they can be used directly
//! in wire types without conversion overhead.

pub mod fmt;
pub mod serde_util;

pub use fmt::balance::{format_units, format_units_with_symbol, DecimalAmount};

use crate::error::KeyringError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sp_core::crypto::{AccountId32, Ss58Codec};
use std::str::FromStr;

// ─── Address ─────────────────────────────────────────────────────────────────

/// An account address in SS58 text form (e.g. `"5GrwvaEF…utQY"`).
///
/// Treated as opaque by the toolkit: equality comparison only, no decoding of
/// its internal structure beyond what [`Address::to_account_bytes`] needs.
/// Serializes transparently as a JSON string. Can be used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render a raw 32-byte account id (as read from storage) as an address.
    pub fn from_account_bytes(bytes: &[u8]) -> Result<Self, KeyringError> {
        let id: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyringError::BadAccountBytes { len: bytes.len() })?;
        Ok(Self(AccountId32::from(id).to_ss58check()))
    }

    /// The raw 32-byte account id behind this address.
    pub fn to_account_bytes(&self) -> Result<[u8; 32], KeyringError> {
        let id = AccountId32::from_ss58check(&self.0)
            .map_err(|_| KeyringError::BadAddress(self.0.clone()))?;
        Ok(id.into())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl FromStr for Address {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Address(s.to_string()))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Address(s))
    }
}

// ─── ChainProperties ─────────────────────────────────────────────────────────

/// Token decimals used when a chain does not advertise any.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 12;

/// Chain-level token properties, as advertised by `system_properties`.
///
/// Nodes are inconsistent about the shape: multi-asset chains send
/// `tokenDecimals`/`tokenSymbol` as arrays, single-asset chains as scalars.
/// Both forms parse; the first entry wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainProperties {
    #[serde(
        default = "default_decimals",
        deserialize_with = "serde_util::u32_scalar_or_first"
    )]
    pub token_decimals: u32,
    #[serde(
        default,
        deserialize_with = "serde_util::string_scalar_or_first"
    )]
    pub token_symbol: Option<String>,
}

fn default_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

impl Default for ChainProperties {
    fn default() -> Self {
        Self {
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            token_symbol: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known dev address (sr25519 //Alice, default SS58 prefix).
    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn test_address_serde_transparent() {
        let addr = Address::new(ALICE);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", ALICE));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }

    #[test]
    fn test_address_account_bytes_round_trip() {
        let addr = Address::new(ALICE);
        let bytes = addr.to_account_bytes().unwrap();
        let back = Address::from_account_bytes(&bytes).unwrap();
        assert_eq!(addr, back);
    }

    #[test]
    fn test_address_rejects_short_account_bytes() {
        let err = Address::from_account_bytes(&[0u8; 20]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::KeyringError::BadAccountBytes { len: 20 }
        ));
    }

    #[test]
    fn test_address_rejects_garbage_ss58() {
        let addr = Address::new("not-an-address");
        assert!(addr.to_account_bytes().is_err());
    }

    #[test]
    fn test_chain_properties_scalar_form() {
        let props: ChainProperties =
            serde_json::from_str(r#"{"tokenDecimals":18,"tokenSymbol":"ETR","ss58Format":42}"#)
                .unwrap();
        assert_eq!(props.token_decimals, 18);
        assert_eq!(props.token_symbol.as_deref(), Some("ETR"));
    }

    #[test]
    fn test_chain_properties_array_form() {
        let props: ChainProperties =
            serde_json::from_str(r#"{"tokenDecimals":[12,6],"tokenSymbol":["DOT","USDT"]}"#)
                .unwrap();
        assert_eq!(props.token_decimals, 12);
        assert_eq!(props.token_symbol.as_deref(), Some("DOT"));
    }

    #[test]
    fn test_chain_properties_empty_object_uses_defaults() {
        let props: ChainProperties = serde_json::from_str("{}").unwrap();
        assert_eq!(props.token_decimals, DEFAULT_TOKEN_DECIMALS);
        assert_eq!(props.token_symbol, None);
    }
}
