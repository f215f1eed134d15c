//! Run configuration: the mutable knobs read at every cycle boundary.

/// Endpoint, credential, and the active flag.
///
/// Design:
/// - Owned by whoever drives the service (UI, CLI); published over a
///   `tokio::sync::watch` channel.
/// - Consumers read the current value at a cycle boundary; an update never
///   interrupts an in-flight batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Remote queue base location.
    pub endpoint: String,

    /// Opaque auth token attached to every remote call.
    pub credential: String,

    /// Whether the periodic loop may fetch/send.
    pub active: bool,
}

impl RunConfig {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential: credential.into(),
            active: true,
        }
    }

    /// Both remote settings are present.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.credential.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_requires_both_settings() {
        assert!(RunConfig::new("http://queue", "token").is_configured());
        assert!(!RunConfig::new("", "token").is_configured());
        assert!(!RunConfig::new("http://queue", "").is_configured());
        assert!(!RunConfig::default().is_configured());
    }
}
