//! App layer: the dispatch loop and the run-state controller built on the
//! ports.
//!
//! - **Dispatcher**: sequential per-batch send/reconcile loop with pacing
//! - **Controller**: periodic timer, config gating, command surface
//! - **status**: summary/status views published to whoever is watching

pub mod controller;
pub mod dispatcher;
pub mod status;

#[cfg(test)]
pub(crate) mod testkit;

pub use self::controller::{Command, Controller, ControllerHandle, PollSettings};
pub use self::dispatcher::{DEFAULT_PACING, Dispatcher, ItemResolution};
pub use self::status::{ControllerStatus, DispatchSummary};
