//! Network constants for the audit toolkit.

use std::time::Duration;

/// Default node WebSocket RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "ws://127.0.0.1:9944";

/// Per-request timeout. A timed-out request is reported for the audit line
/// it belongs to; queued audits for other subsystems still run.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
