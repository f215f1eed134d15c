//! Ports: seams to the external systems the dispatch loop talks to.
//!
//! The remote store and the native send capability are consumed through
//! these traits; implementations live in `impls` (and test fakes next to
//! the code that exercises them).

pub mod queue_client;
pub mod send_gate;

pub use self::queue_client::QueueClient;
pub use self::send_gate::SendGate;
