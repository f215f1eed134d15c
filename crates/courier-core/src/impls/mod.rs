//! Port implementations (HTTP store client, development gate).

pub mod dry_run;
pub mod http_queue;

pub use self::dry_run::DryRunGate;
pub use self::http_queue::HttpQueueClient;
