//! Unified audit-toolkit error types.

use thiserror::Error;

/// Top-level error for audit flows.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Keyring error: {0}")]
    Keyring(#[from] KeyringError),

    #[error("Chain-spec patch error: {0}")]
    SpecPatch(#[from] SpecPatchError),

    #[error("Storage value decode failed: {0}")]
    Scale(#[from] parity_scale_codec::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors building a [`crate::metadata::ChainMetadata`] tree.
///
/// Lookup operations on a loaded tree never fail — absence of a pallet or
/// item is an expected audit outcome and is returned as a value, not an
/// error.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata blob does not decode: {0}")]
    Codec(parity_scale_codec::Error),

    #[error("Metadata blob is not runtime metadata (bad magic number)")]
    BadMagic,

    #[error("Unsupported metadata version (only V14 and V15 are handled)")]
    UnsupportedVersion,
}

/// Account derivation and address parsing errors.
#[derive(Error, Debug)]
pub enum KeyringError {
    /// The secret phrase cannot be parsed under the derivation grammar.
    /// Reported per candidate; never aborts a matching scan.
    #[error("Secret phrase does not parse: {0}")]
    BadSecret(String),

    #[error("Not a valid SS58 address: {0}")]
    BadAddress(String),

    #[error("Raw value is not a 32-byte account id ({len} bytes)")]
    BadAccountBytes { len: usize },
}

/// Chain-connection errors.
#[derive(Error, Debug)]
pub enum RpcError {
    #[cfg(feature = "rpc")]
    #[error("Request failed: {0}")]
    Transport(#[from] jsonrpsee::core::ClientError),

    #[error("Request timed out")]
    Timeout,

    #[error("Node returned an unexpected payload: {0}")]
    UnexpectedResponse(String),

    #[error("Hex payload does not decode: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Genesis-document patch errors. Both are fatal to the patch; a partially
/// written document is never reported as success.
#[derive(Error, Debug)]
pub enum SpecPatchError {
    #[error("Path segment `{segment}` not found under `{parent}`")]
    PathNotFound { parent: String, segment: String },

    #[error("Value at `{0}` is not an object")]
    NotAnObject(String),

    #[error("Document does not parse: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
