//! SendGate port: the device-level send capability.

use async_trait::async_trait;

use crate::domain::SendOutcome;

/// One native send attempt.
///
/// The gate is stateful about device permission but stateless about message
/// content. When it reports `PermissionGranted` the message was not sent;
/// the caller owns the single retry required to complete the real send.
#[async_trait]
pub trait SendGate: Send + Sync {
    async fn attempt_send(&self, phone: &str, message: &str) -> SendOutcome;
}
