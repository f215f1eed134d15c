use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-batch counts from one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
    pub retained: usize,
}

/// Controller-level view published after every cycle or command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControllerStatus {
    pub line: String,
    pub pending: usize,
    pub sent_total: usize,
    pub failed_total: usize,
    pub last_cycle_at: Option<DateTime<Utc>>,
}
