//! # Bridgescope
//!
//! Chain-state addressing and audit toolkit for Substrate-based chains.
//!
//! ## Architecture
//!
//! The toolkit is organized in layers:
//!
//! 1. **Core** — pure leaf components, no I/O: storage-key derivation,
//!    metadata introspection, candidate-account matching, fixed-point
//!    balance formatting, chain-spec patching
//! 2. **Connection** — the `ChainConnection` seam plus a `jsonrpsee`
//!    WebSocket implementation (`rpc` feature)
//! 3. **Orchestration** — `Auditor`, which sequences the leaves over one
//!    injected connection and renders typed reports
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bridgescope::prelude::*;
//!
//! let conn = ChainRpc::connect("ws://127.0.0.1:9944").await?;
//! let auditor = Auditor::new(conn).await?;
//!
//! let report = auditor.audit_bridge_operators().await;
//! print!("{}", report.render_text());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting used across all modules.
pub mod shared;

/// Storage-key derivation and value layouts.
pub mod storage;

/// Metadata introspection: the chain's callable surface as a typed tree.
pub mod metadata;

/// Candidate-account derivation and matching.
pub mod keyring;

/// Genesis chain-spec patching.
pub mod chainspec;

/// Unified error types.
pub mod error;

/// Network constants.
pub mod network;

// ── Layer 2: Connection ──────────────────────────────────────────────────────

/// The chain-connection collaborator seam.
pub mod rpc;

// ── Layer 3: Orchestration ───────────────────────────────────────────────────

/// `Auditor` — the primary entry point.
#[cfg(feature = "rpc")]
pub mod audit;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, ChainProperties, DecimalAmount};

    // Storage addressing
    pub use crate::storage::{storage_map_key, storage_value_key, MapHasher, StorageKey};

    // Introspection
    pub use crate::metadata::{CallableInfo, ChainMetadata, PalletInfo, StorageItemInfo};

    // Account matching
    pub use crate::keyring::{derive_address, match_target, Candidate, MatchOutcome};

    // Balance formatting
    pub use crate::shared::fmt::balance::{format_units, format_units_with_symbol};

    // Chain-spec patching
    pub use crate::chainspec::{patch_genesis_field, patch_spec_file, RUNTIME_GENESIS_PATH};

    // Errors
    pub use crate::error::AuditError;

    // Connection
    pub use crate::rpc::ChainConnection;
    #[cfg(feature = "rpc")]
    pub use crate::rpc::ChainRpc;

    // Orchestration
    #[cfg(feature = "rpc")]
    pub use crate::audit::{AuditLine, AuditReport, Auditor, LineOutcome};

    // Network
    pub use crate::network::DEFAULT_RPC_URL;
}
