//! Dispatch loop: drives each pending message to a terminal status.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use super::status::DispatchSummary;
use crate::domain::{PendingMessage, SendOutcome};
use crate::ports::{QueueClient, SendGate};

/// Pacing between consecutive sends within one batch.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Terminal bookkeeping for one dispatched message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemResolution {
    /// Terminal status persisted remotely; the item leaves the local list.
    Reconciled { sent: bool },

    /// `update_status` failed; the item stays for the next cycle.
    Retained,
}

/// Sequential dispatcher over a fetched batch.
///
/// Design:
/// - One message at a time, strictly in fetch order; a pacing sleep
///   separates consecutive items to throttle the outbound rate.
/// - All per-item faults stay contained in that item's resolution; the
///   batch always runs to the end.
pub struct Dispatcher {
    gate: Arc<dyn SendGate>,
    queue: Arc<dyn QueueClient>,
    pacing: Duration,
}

impl Dispatcher {
    pub fn new(gate: Arc<dyn SendGate>, queue: Arc<dyn QueueClient>) -> Self {
        Self {
            gate,
            queue,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Attempt one message, advance it to a terminal status, and reconcile
    /// that status with the remote store.
    ///
    /// The item is pruned from the caller's list iff the terminal
    /// `update_status` succeeds. A message that was actually handed to the
    /// carrier but whose update failed is retained and will be re-fetched
    /// as pending next cycle: a known duplicate-send risk, preferred over
    /// silently losing the reconciliation.
    pub async fn dispatch_one(&self, message: &mut PendingMessage) -> ItemResolution {
        let first = self.gate.attempt_send(&message.phone, &message.message).await;
        let outcome = match first {
            SendOutcome::PermissionGranted => {
                // The grant consumed this attempt; the gate contract owes
                // exactly one retry with identical arguments.
                let retry = self.gate.attempt_send(&message.phone, &message.message).await;
                match retry {
                    SendOutcome::Sent => SendOutcome::Sent,
                    other => SendOutcome::error(
                        "post_permission",
                        format!("send failed after permission grant: {}", other.failure_text()),
                    ),
                }
            }
            other => other,
        };

        match &outcome {
            SendOutcome::Sent => {
                message.mark_sent();
                info!(id = %message.id, phone = %message.phone, "message sent");
            }
            other => {
                let detail = other.failure_text();
                warn!(id = %message.id, %detail, "send failed");
                message.mark_error(detail);
            }
        }

        match self.queue.update_status(message).await {
            Ok(()) => ItemResolution::Reconciled {
                sent: outcome == SendOutcome::Sent,
            },
            Err(err) => {
                warn!(id = %message.id, %err, "status update failed; item retained");
                ItemResolution::Retained
            }
        }
    }

    /// Run one fetched batch, strictly in fetch order.
    ///
    /// Reconciled items are pruned from `pending` in place; retained items
    /// keep their position for the next cycle.
    pub async fn dispatch_batch(&self, pending: &mut Vec<PendingMessage>) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let mut index = 0;
        let mut processed = 0;
        while index < pending.len() {
            if processed > 0 {
                // Pacing barrier between consecutive items.
                sleep(self.pacing).await;
            }
            processed += 1;
            match self.dispatch_one(&mut pending[index]).await {
                ItemResolution::Reconciled { sent } => {
                    if sent {
                        summary.sent += 1;
                    } else {
                        summary.failed += 1;
                    }
                    pending.remove(index);
                }
                ItemResolution::Retained => {
                    summary.retained += 1;
                    index += 1;
                }
            }
        }
        summary
    }
}
