//! Error taxonomy for transport and configuration failures.
//!
//! Send-capability failures are deliberately not represented here: they are
//! data (`SendOutcome`) that terminally transition one message to `Error`
//! status. Nothing per-item ever escalates into a batch or process failure.

use thiserror::Error;

/// Failure talking to the remote queue store.
///
/// A fetch that fails with this type is distinguishable from "truly no
/// pending items"; callers degrade to an empty cycle but must surface it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("response decode failed: {0}")]
    Decode(String),
}

/// The controller cannot run a cycle with the current configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint or credential")]
    NotReady,
}
