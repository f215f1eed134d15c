//! Message model and status state machine.

use serde::{Deserialize, Serialize};

/// Delivery status of a message in the remote queue.
///
/// State transitions:
/// - Pending -> Sent (native send confirmed and reconciled)
/// - Pending -> Error (send failed terminally)
///
/// A message never moves backwards once advanced.
///
/// The wire form is SCREAMING_SNAKE_CASE. Older remote records carry the
/// legacy `SENDED` tag; it parses as `Sent` and is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Pending,
    #[serde(alias = "SENDED")]
    Sent,
    Error,
}

impl MessageStatus {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, MessageStatus::Sent | MessageStatus::Error)
    }
}

/// One outbound message materialized from the remote store.
///
/// Design:
/// - Instances are created remotely and exist locally only between a fetch
///   and the reconciliation of their terminal status.
/// - `mark_sent` / `mark_error` are the only mutation surface, so `error`
///   is populated exactly when `status` is `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMessage {
    /// Remote-assigned identifier, stable across fetch/update cycles.
    pub id: String,

    /// Destination address.
    pub phone: String,

    /// Body text.
    pub message: String,

    pub status: MessageStatus,

    /// Last failure description, present iff `status` is `Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PendingMessage {
    pub fn new(id: impl Into<String>, phone: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone: phone.into(),
            message: message.into(),
            status: MessageStatus::Pending,
            error: None,
        }
    }

    /// Advance to `Sent`.
    pub fn mark_sent(&mut self) {
        self.status = MessageStatus::Sent;
        self.error = None;
    }

    /// Advance to `Error` with a failure description.
    pub fn mark_error(&mut self, detail: impl Into<String>) {
        self.status = MessageStatus::Error;
        self.error = Some(detail.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MessageStatus::Pending, "\"PENDING\"")]
    #[case(MessageStatus::Sent, "\"SENT\"")]
    #[case(MessageStatus::Error, "\"ERROR\"")]
    fn status_serializes_as_wire_tags(#[case] status: MessageStatus, #[case] wire: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), wire);
        let back: MessageStatus = serde_json::from_str(wire).unwrap();
        assert_eq!(back, status);
    }

    #[test]
    fn legacy_sended_tag_parses_as_sent() {
        let back: MessageStatus = serde_json::from_str("\"SENDED\"").unwrap();
        assert_eq!(back, MessageStatus::Sent);
        // Never emitted back out.
        assert_eq!(serde_json::to_string(&back).unwrap(), "\"SENT\"");
    }

    #[test]
    fn error_field_is_absent_unless_set() {
        let mut msg = PendingMessage::new("1", "+1555", "hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("error").is_none());

        msg.mark_error("no signal");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["error"], "no signal");
        assert_eq!(json["status"], "ERROR");
    }

    #[test]
    fn transitions_keep_error_and_status_in_step() {
        let mut msg = PendingMessage::new("1", "+1555", "hi");
        assert_eq!(msg.status, MessageStatus::Pending);
        assert!(msg.error.is_none());

        msg.mark_error("boom");
        assert_eq!(msg.status, MessageStatus::Error);
        assert!(msg.error.is_some());

        msg.mark_sent();
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(msg.error.is_none());
    }

    #[test]
    fn remote_record_roundtrip() {
        let raw = r#"{"id":"42","phone":"+1555","message":"hi","status":"SENDED"}"#;
        let msg: PendingMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.id, "42");
        assert_eq!(msg.status, MessageStatus::Sent);
        assert!(msg.error.is_none());
    }
}
