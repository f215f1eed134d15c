//! courier-core
//!
//! Core building blocks for the Courier dispatch service: poll a remote
//! queue of pending outbound messages, attempt each through a device-level
//! send capability, and reconcile per-item terminal status back to the
//! store.
//!
//! # Module layout
//! - **domain**: message model, send outcomes, run config, error taxonomy
//! - **ports**: seams to the remote store and the native send capability
//! - **impls**: reqwest-backed store client, development gate
//! - **app**: dispatch loop, run-state controller, status views

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{Command, Controller, ControllerHandle, ControllerStatus, PollSettings};
pub use domain::{MessageStatus, PendingMessage, RunConfig, SendOutcome, TransportError};
pub use ports::{QueueClient, SendGate};
