//! Dry-run gate for development: logs the attempt and reports success.

use async_trait::async_trait;
use tracing::info;

use crate::domain::SendOutcome;
use crate::ports::SendGate;

/// SendGate stand-in for running the loop without a device.
///
/// The real capability is platform glue supplied by embedders; this one
/// lets the binary exercise the full fetch/dispatch/reconcile path against
/// a real remote store.
pub struct DryRunGate;

#[async_trait]
impl SendGate for DryRunGate {
    async fn attempt_send(&self, phone: &str, message: &str) -> SendOutcome {
        info!(phone, bytes = message.len(), "dry-run send");
        SendOutcome::Sent
    }
}
