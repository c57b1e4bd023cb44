//! On-chain storage addressing.
//!
//! Storage addresses are derived from human-readable pallet/item names under
//! the standard twox-128 layout: `twox128(pallet) ‖ twox128(item)`, with map
//! entries appending the hashed map key. Derivation is a pure function of
//! its string inputs — no chain access, no shared state.

pub mod account;

use sp_crypto_hashing::{blake2_128, twox_128, twox_64};

// ─── StorageKey ──────────────────────────────────────────────────────────────

/// A derived storage address.
///
/// Value keys are exactly 32 bytes (two 16-byte digests, pallet first, no
/// separator, no length prefix). Equal `(pallet, item)` pairs always derive
/// byte-identical keys. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(Vec<u8>);

impl StorageKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `0x`-prefixed hex, the form the node RPC expects.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for StorageKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ─── Derivation ──────────────────────────────────────────────────────────────

/// Derive the storage key of a plain (non-map) storage value.
///
/// There is exactly one valid ordering: the pallet digest comes first.
/// Empty strings are valid inputs and hash like any other string.
pub fn storage_value_key(pallet: &str, item: &str) -> StorageKey {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&twox_128(pallet.as_bytes()));
    key.extend_from_slice(&twox_128(item.as_bytes()));
    StorageKey(key)
}

/// Hasher applied to a map key before it is appended to the 32-byte prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapHasher {
    /// `blake2_128(key) ‖ key` — the default for attacker-controlled keys.
    Blake2_128Concat,
    /// `twox64(key) ‖ key` — cheaper, for trusted keys.
    Twox64Concat,
    /// The SCALE-encoded key verbatim.
    Identity,
}

/// Derive the storage key of one entry of a storage map.
///
/// `encoded_key` is the SCALE encoding of the map key (for an account-keyed
/// map, the raw 32 account-id bytes).
pub fn storage_map_key(
    pallet: &str,
    item: &str,
    hasher: MapHasher,
    encoded_key: &[u8],
) -> StorageKey {
    let mut key = storage_value_key(pallet, item).0;
    match hasher {
        MapHasher::Blake2_128Concat => {
            key.extend_from_slice(&blake2_128(encoded_key));
            key.extend_from_slice(encoded_key);
        }
        MapHasher::Twox64Concat => {
            key.extend_from_slice(&twox_64(encoded_key));
            key.extend_from_slice(encoded_key);
        }
        MapHasher::Identity => key.extend_from_slice(encoded_key),
    }
    StorageKey(key)
}
