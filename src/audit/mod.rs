//! Bridge audit orchestration.
//!
//! [`Auditor`] composes the leaf components over one injected
//! [`ChainConnection`]: the introspector answers what exists, the key codec
//! addresses it, the connection fetches it, the decoder and keyring render
//! and match. The orchestrator hashes, decodes and parses nothing itself.
//!
//! Subsystems are audited sequentially so the shared connection has one
//! request in flight at a time. A failed request becomes a failed report
//! line; audits queued behind it still run — partial results beat an
//! all-or-nothing failure in a diagnostic tool.

pub mod report;

pub use report::{AuditLine, AuditReport, LineOutcome};

use crate::error::AuditError;
use crate::keyring::{self, Candidate, MatchOutcome};
use crate::metadata::ChainMetadata;
use crate::rpc::ChainConnection;
use crate::shared::fmt::balance::{format_units, format_units_with_symbol};
use crate::shared::{Address, ChainProperties};
use crate::storage::account::{decode_account_info, decode_balance};
use crate::storage::{storage_map_key, storage_value_key, MapHasher};

use async_lock::RwLock;
use tracing::{debug, warn};

/// The storage item a bridge pallet exposes its operator account under.
pub const OPERATOR_ITEM: &str = "BridgeOperator";

/// Composes the leaf components over one chain connection.
pub struct Auditor<C> {
    conn: C,
    metadata: ChainMetadata,
    /// Token properties, fetched once on first use.
    properties: RwLock<Option<ChainProperties>>,
}

impl<C: ChainConnection> Auditor<C> {
    /// Fetch and load the chain's metadata over `conn`.
    ///
    /// An unreachable node or an undecodable blob aborts here — with no
    /// metadata there is nothing to audit.
    pub async fn new(conn: C) -> Result<Self, AuditError> {
        let bytes = conn.metadata_bytes().await?;
        let metadata = ChainMetadata::from_bytes(&bytes)?;
        debug!(pallets = metadata.pallets().len(), "metadata loaded");
        Ok(Self {
            conn,
            metadata,
            properties: RwLock::new(None),
        })
    }

    pub fn metadata(&self) -> &ChainMetadata {
        &self.metadata
    }

    /// Token properties, defaulting when the node does not advertise any.
    pub async fn properties(&self) -> ChainProperties {
        {
            let cached = self.properties.read().await;
            if let Some(props) = cached.as_ref() {
                return props.clone();
            }
        }
        let fetched = match self.conn.system_properties().await {
            Ok(props) => props,
            Err(e) => {
                warn!(error = %e, "system_properties unavailable, using defaults");
                ChainProperties::default()
            }
        };
        *self.properties.write().await = Some(fetched.clone());
        fetched
    }

    /// Audit one well-known storage slot: does the pallet declare it, and
    /// what does the chain currently hold there?
    pub async fn audit_slot(&self, pallet: &str, item: &str) -> AuditLine {
        let subject = format!("{pallet}.{item}");
        let Some(info) = self.metadata.pallet(pallet) else {
            return AuditLine::missing(subject, "pallet not present");
        };
        if !info.has_storage_item(item) {
            return AuditLine::missing(subject, "storage item not declared");
        }
        let key = storage_value_key(pallet, item);
        match self.conn.storage(&key).await {
            Ok(Some(bytes)) => AuditLine::found(subject, render_account_value(&bytes)),
            Ok(None) => AuditLine::unset(subject),
            Err(e) => AuditLine::failed(subject, e),
        }
    }

    /// Operator audit across every pallet whose name contains "bridge".
    pub async fn audit_bridge_operators(&self) -> AuditReport {
        let mut report = AuditReport::new("bridge operator audit");
        for pallet in self.metadata.search("bridge") {
            report.push(self.audit_slot(pallet, OPERATOR_ITEM).await);
        }
        report
    }

    /// Free and reserved balances of one account.
    pub async fn audit_balance(&self, address: &Address) -> AuditLine {
        let subject = format!("balance of {address}");
        let account = match address.to_account_bytes() {
            Ok(bytes) => bytes,
            Err(e) => return AuditLine::failed(subject, e),
        };
        let key = storage_map_key("System", "Account", MapHasher::Blake2_128Concat, &account);
        match self.conn.storage(&key).await {
            Ok(Some(bytes)) => match decode_account_info(&bytes) {
                Ok(info) => {
                    let props = self.properties().await;
                    let symbol = props.token_symbol.as_deref().unwrap_or("units");
                    AuditLine::found(
                        subject,
                        format!(
                            "free {}, reserved {}",
                            format_units_with_symbol(info.data.free, props.token_decimals, symbol),
                            format_units(info.data.reserved, props.token_decimals),
                        ),
                    )
                }
                Err(e) => AuditLine::failed(subject, e),
            },
            Ok(None) => AuditLine::missing(subject, "account has no on-chain record"),
            Err(e) => AuditLine::failed(subject, e),
        }
    }

    /// Total token issuance.
    pub async fn audit_total_issuance(&self) -> AuditLine {
        let subject = "Balances.TotalIssuance".to_string();
        let key = storage_value_key("Balances", "TotalIssuance");
        match self.conn.storage(&key).await {
            Ok(Some(bytes)) => match decode_balance(&bytes) {
                Ok(raw) => {
                    let props = self.properties().await;
                    let symbol = props.token_symbol.as_deref().unwrap_or("units");
                    AuditLine::found(
                        subject,
                        format_units_with_symbol(raw, props.token_decimals, symbol),
                    )
                }
                Err(e) => AuditLine::failed(subject, e),
            },
            Ok(None) => AuditLine::unset(subject),
            Err(e) => AuditLine::failed(subject, e),
        }
    }

    /// Hunt for the identity behind a privileged account: feed an ordered
    /// candidate list into the matcher against `target`.
    pub fn find_privileged_account(
        &self,
        target: &Address,
        candidates: impl IntoIterator<Item = Candidate>,
    ) -> MatchOutcome {
        keyring::match_target(target, candidates)
    }
}

/// Render a raw storage value that should hold an account id: SS58 when it
/// is one, plain hex otherwise.
fn render_account_value(bytes: &[u8]) -> String {
    match Address::from_account_bytes(bytes) {
        Ok(address) => address.to_string(),
        Err(_) => format!("0x{}", hex::encode(bytes)),
    }
}
