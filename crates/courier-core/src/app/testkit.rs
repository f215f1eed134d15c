//! Scripted port fakes shared by the dispatcher and controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PendingMessage, SendOutcome, TransportError};
use crate::ports::{QueueClient, SendGate};

/// Gate that replays a script of outcomes and records every call.
///
/// An exhausted script keeps answering `Sent` so long-running controller
/// tests don't need exact call counts up front.
pub(crate) struct ScriptedGate {
    script: Mutex<VecDeque<SendOutcome>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGate {
    pub fn new(script: Vec<SendOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SendGate for ScriptedGate {
    async fn attempt_send(&self, phone: &str, message: &str) -> SendOutcome {
        self.calls
            .lock()
            .await
            .push((phone.to_string(), message.to_string()));
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or(SendOutcome::Sent)
    }
}

/// Queue client over canned batches, with switchable failure injection.
pub(crate) struct StubQueue {
    batches: Mutex<VecDeque<Vec<PendingMessage>>>,
    pub updates: Mutex<Vec<PendingMessage>>,
    pub fetch_calls: AtomicUsize,
    fail_updates: AtomicUsize,
    fail_fetches: AtomicUsize,
}

impl StubQueue {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            updates: Mutex::new(Vec::new()),
            fetch_calls: AtomicUsize::new(0),
            fail_updates: AtomicUsize::new(0),
            fail_fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_batch(batch: Vec<PendingMessage>) -> Self {
        let stub = Self::new();
        stub.batches.try_lock().unwrap().push_back(batch);
        stub
    }

    /// Fail the next `n` update calls with a network error.
    pub fn fail_next_updates(&self, n: usize) {
        self.fail_updates.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` fetch calls with a network error.
    pub fn fail_next_fetches(&self, n: usize) {
        self.fail_fetches.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl QueueClient for StubQueue {
    async fn fetch_pending(&self) -> Result<Vec<PendingMessage>, TransportError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if take_one(&self.fail_fetches) {
            return Err(TransportError::Network("stub offline".to_string()));
        }
        Ok(self.batches.lock().await.pop_front().unwrap_or_default())
    }

    async fn update_status(&self, message: &PendingMessage) -> Result<(), TransportError> {
        if take_one(&self.fail_updates) {
            return Err(TransportError::Network("stub offline".to_string()));
        }
        self.updates.lock().await.push(message.clone());
        Ok(())
    }
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}
