//! QueueClient port: the remote pending-message store.

use async_trait::async_trait;

use crate::domain::{PendingMessage, TransportError};

/// Remote store seam.
///
/// Design intent:
/// - A transport failure on fetch is an explicit error, never an empty
///   list; the caller decides how to degrade.
/// - `update_status` persists the full item keyed by id; writing the same
///   terminal state twice is safe and yields the same remote record.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// List every item still pending on the remote store.
    async fn fetch_pending(&self) -> Result<Vec<PendingMessage>, TransportError>;

    /// Persist the item's current state (status and error included).
    async fn update_status(&self, message: &PendingMessage) -> Result<(), TransportError>;
}
