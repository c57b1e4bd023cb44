//! WebSocket JSON-RPC implementation of [`ChainConnection`].

use super::ChainConnection;
use crate::error::RpcError;
use crate::network::DEFAULT_REQUEST_TIMEOUT;
use crate::shared::ChainProperties;
use crate::storage::StorageKey;

use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::ClientError;
use jsonrpsee::rpc_params;
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// A WebSocket connection to one chain node.
///
/// One request is in flight at a time from the auditor's point of view; a
/// per-request timeout turns a hung node into a reportable per-line failure
/// instead of a stalled run.
pub struct ChainRpc {
    client: WsClient,
    request_timeout: Duration,
}

impl ChainRpc {
    /// Connect with the default request timeout.
    pub async fn connect(url: &str) -> Result<Self, RpcError> {
        Self::connect_with_timeout(url, DEFAULT_REQUEST_TIMEOUT).await
    }

    pub async fn connect_with_timeout(url: &str, request_timeout: Duration) -> Result<Self, RpcError> {
        debug!(url, "connecting to node");
        let client = WsClientBuilder::default()
            .request_timeout(request_timeout)
            .build(url)
            .await
            .map_err(map_client_error)?;
        Ok(Self {
            client,
            request_timeout,
        })
    }

    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, RpcError> {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_client_error(e)),
            Err(_) => Err(RpcError::Timeout),
        }
    }
}

impl ChainConnection for ChainRpc {
    async fn metadata_bytes(&self) -> Result<Vec<u8>, RpcError> {
        let blob: String = self
            .with_timeout(self.client.request("state_getMetadata", rpc_params![]))
            .await?;
        decode_hex_payload(&blob)
    }

    async fn storage(&self, key: &StorageKey) -> Result<Option<Vec<u8>>, RpcError> {
        let value: Option<String> = self
            .with_timeout(
                self.client
                    .request("state_getStorage", rpc_params![key.to_hex()]),
            )
            .await?;
        value.map(|v| decode_hex_payload(&v)).transpose()
    }

    async fn system_properties(&self) -> Result<ChainProperties, RpcError> {
        let raw: serde_json::Value = self
            .with_timeout(self.client.request("system_properties", rpc_params![]))
            .await?;
        serde_json::from_value(raw).map_err(|e| RpcError::UnexpectedResponse(e.to_string()))
    }
}

fn map_client_error(e: ClientError) -> RpcError {
    match e {
        ClientError::RequestTimeout => RpcError::Timeout,
        other => RpcError::Transport(other),
    }
}

fn decode_hex_payload(blob: &str) -> Result<Vec<u8>, RpcError> {
    Ok(hex::decode(blob.trim_start_matches("0x"))?)
}
