//! Send outcome model: the native capability boundary.

/// Fixed description used when the device reports no send capability at all.
pub const UNAVAILABLE_DETAIL: &str = "send capability unavailable on this device";

/// Result of one native send attempt.
///
/// `PermissionGranted` means the underlying permission was obtained as a
/// side effect of the call and the message was NOT sent; the caller owes the
/// gate exactly one retry with identical arguments to complete the real
/// send. No other retry is anyone's responsibility here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    PermissionGranted,
    Error { code: String, detail: String },
    Unavailable,
}

impl SendOutcome {
    pub fn error(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            detail: detail.into(),
        }
    }

    /// Convert the capability's raw string code into the closed variant set.
    ///
    /// The native layer reports plain strings ("sent", "permission_granted",
    /// ...); anything it can produce is converted here, at the boundary, so
    /// the rest of the crate never matches on ad-hoc strings.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "sent" => Self::Sent,
            "permission_granted" => Self::PermissionGranted,
            "unavailable" => Self::Unavailable,
            other => Self::error(
                "unexpected_result",
                format!("send resulted in unexpected status: {other}"),
            ),
        }
    }

    /// Human-readable failure description for terminal reporting.
    pub fn failure_text(&self) -> String {
        match self {
            SendOutcome::Sent => "sent".to_string(),
            SendOutcome::PermissionGranted => "permission granted without a send".to_string(),
            SendOutcome::Error { code, detail } => format!("{code}: {detail}"),
            SendOutcome::Unavailable => UNAVAILABLE_DETAIL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sent", SendOutcome::Sent)]
    #[case("permission_granted", SendOutcome::PermissionGranted)]
    #[case("unavailable", SendOutcome::Unavailable)]
    fn known_wire_codes_map_to_variants(#[case] raw: &str, #[case] expected: SendOutcome) {
        assert_eq!(SendOutcome::from_wire(raw), expected);
    }

    #[test]
    fn unknown_wire_code_becomes_error_with_raw_text() {
        let outcome = SendOutcome::from_wire("cancelled");
        match outcome {
            SendOutcome::Error { code, detail } => {
                assert_eq!(code, "unexpected_result");
                assert!(detail.contains("cancelled"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn failure_text_carries_code_and_detail() {
        let outcome = SendOutcome::error("E_SMS_SEND_FAILED", "radio off");
        assert_eq!(outcome.failure_text(), "E_SMS_SEND_FAILED: radio off");
        assert_eq!(SendOutcome::Unavailable.failure_text(), UNAVAILABLE_DETAIL);
    }
}
