//! Chain-connection collaborator.
//!
//! The toolkit never owns a connection lifecycle; it consumes the three
//! read-side capabilities below through [`ChainConnection`], injected into
//! the auditor. The `client` submodule provides the WebSocket implementation
//! behind the `rpc` feature; tests substitute in-memory fakes.

#[cfg(feature = "rpc")]
pub mod client;

#[cfg(feature = "rpc")]
pub use client::ChainRpc;

use crate::error::RpcError;
use crate::shared::ChainProperties;
use crate::storage::StorageKey;

/// Read-side view of a running chain node.
#[allow(async_fn_in_trait)]
pub trait ChainConnection {
    /// The raw runtime metadata blob (`state_getMetadata`).
    async fn metadata_bytes(&self) -> Result<Vec<u8>, RpcError>;

    /// The raw value stored under `key`, `None` when the slot is empty
    /// (`state_getStorage`).
    async fn storage(&self, key: &StorageKey) -> Result<Option<Vec<u8>>, RpcError>;

    /// Token properties the chain advertises (`system_properties`).
    async fn system_properties(&self) -> Result<ChainProperties, RpcError>;
}
