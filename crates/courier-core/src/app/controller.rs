//! Run-state controller: owns the polling cadence and the local pending list.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use super::dispatcher::{DEFAULT_PACING, Dispatcher, ItemResolution};
use super::status::ControllerStatus;
use crate::domain::{ConfigError, PendingMessage, RunConfig};
use crate::ports::{QueueClient, SendGate};

const COMMAND_BUFFER: usize = 16;

/// Cadence knobs for the periodic loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Time between fetch/dispatch cycles.
    pub interval: Duration,

    /// Pacing between consecutive sends within one batch.
    pub pacing: Duration,
}

impl PollSettings {
    /// Conditional variant: poll once a minute.
    pub fn conditional() -> Self {
        Self {
            interval: Duration::from_secs(60),
            pacing: DEFAULT_PACING,
        }
    }

    /// Always-on variant: poll every five seconds.
    pub fn always_on() -> Self {
        Self {
            interval: Duration::from_secs(5),
            pacing: DEFAULT_PACING,
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::conditional()
    }
}

/// Commands injected into the controller's select loop.
///
/// Everything funnels through the single loop task, so a command can never
/// overlap an in-flight cycle.
#[derive(Debug)]
pub enum Command {
    /// User-triggered single send; bypasses the periodic gate and the
    /// active flag but follows the same per-item logic.
    SendNow(PendingMessage),

    /// Fetch-only refresh of the local pending list, no dispatching.
    Refresh,

    /// Stop after the current cycle.
    Shutdown,
}

/// Handle to a spawned controller.
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<ControllerStatus>,
    join: JoinHandle<()>,
}

impl ControllerHandle {
    pub fn commands(&self) -> mpsc::Sender<Command> {
        self.commands.clone()
    }

    pub fn status(&self) -> watch::Receiver<ControllerStatus> {
        self.status.clone()
    }

    /// Stop the loop and wait for it to finish the cycle in flight.
    pub async fn shutdown(self) {
        // ignore send error: the loop may already be gone
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.join.await;
    }
}

/// Periodic fetch/dispatch driver.
///
/// Design:
/// - Exactly one cycle runs at a time: the timer tick, every command, and
///   the dispatch batch all execute on this single task, so a tick that
///   fires mid-batch is naturally deferred.
/// - `RunConfig` is read from the watch at each cycle boundary; toggling
///   `active` never interrupts a batch in flight.
pub struct Controller {
    dispatcher: Dispatcher,
    queue: Arc<dyn QueueClient>,
    config: watch::Receiver<RunConfig>,
    pending: Vec<PendingMessage>,
    status_tx: watch::Sender<ControllerStatus>,
    sent_total: usize,
    failed_total: usize,
    last_cycle_at: Option<DateTime<Utc>>,
}

impl Controller {
    /// Spawn the loop on its own task. The first cycle runs immediately,
    /// subsequent ones at the configured interval.
    pub fn spawn(
        gate: Arc<dyn SendGate>,
        queue: Arc<dyn QueueClient>,
        config: watch::Receiver<RunConfig>,
        settings: PollSettings,
    ) -> ControllerHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (status_tx, status_rx) = watch::channel(ControllerStatus::default());

        let controller = Controller {
            dispatcher: Dispatcher::new(gate, Arc::clone(&queue)).with_pacing(settings.pacing),
            queue,
            config,
            pending: Vec::new(),
            status_tx,
            sent_total: 0,
            failed_total: 0,
            last_cycle_at: None,
        };

        let join = tokio::spawn(controller.run(settings.interval, command_rx));

        ControllerHandle {
            commands: command_tx,
            status: status_rx,
            join,
        }
    }

    async fn run(mut self, period: Duration, mut commands: mpsc::Receiver<Command>) {
        let mut ticker = interval(period);
        // A tick that fired while a batch was running should not burst.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.run_cycle().await,
                cmd = commands.recv() => match cmd {
                    Some(Command::SendNow(message)) => self.send_now(message).await,
                    Some(Command::Refresh) => self.refresh().await,
                    Some(Command::Shutdown) | None => break,
                },
            }
        }
        info!("controller stopped");
    }

    async fn run_cycle(&mut self) {
        let config = self.config.borrow().clone();
        if !config.active {
            self.publish("polling paused");
            return;
        }
        if !config.is_configured() {
            self.publish(&ConfigError::NotReady.to_string());
            return;
        }

        match self.queue.fetch_pending().await {
            Ok(batch) => {
                // Wholesale replacement: the remote PENDING set is the
                // source of truth at fetch time.
                self.pending = batch;
            }
            Err(err) => {
                // Degrade to "no items this cycle" but keep the failure
                // distinguishable from an empty queue.
                warn!(%err, "fetch failed");
                self.publish(&format!("fetch failed: {err}"));
                return;
            }
        }

        let summary = self.dispatcher.dispatch_batch(&mut self.pending).await;
        self.sent_total += summary.sent;
        self.failed_total += summary.failed;
        self.last_cycle_at = Some(Utc::now());
        self.publish(&format!(
            "cycle complete: {} sent, {} failed, {} pending",
            summary.sent,
            summary.failed,
            self.pending.len()
        ));
    }

    async fn send_now(&mut self, mut message: PendingMessage) {
        match self.dispatcher.dispatch_one(&mut message).await {
            ItemResolution::Reconciled { sent } => {
                if sent {
                    self.sent_total += 1;
                    self.publish(&format!("sent to {}", message.phone));
                } else {
                    self.failed_total += 1;
                    self.publish(&format!("send to {} failed", message.phone));
                }
            }
            ItemResolution::Retained => {
                // Reconciliation pending; pick it up with the next cycle.
                self.pending.push(message);
                self.publish("send recorded locally, status update pending");
            }
        }
    }

    async fn refresh(&mut self) {
        let config = self.config.borrow().clone();
        if !config.is_configured() {
            self.publish(&ConfigError::NotReady.to_string());
            return;
        }
        match self.queue.fetch_pending().await {
            Ok(batch) => {
                self.pending = batch;
                self.publish(&format!("{} pending", self.pending.len()));
            }
            Err(err) => self.publish(&format!("fetch failed: {err}")),
        }
    }

    fn publish(&self, line: &str) {
        // ignore send error: receivers may already be dropped
        let _ = self.status_tx.send(ControllerStatus {
            line: line.to_string(),
            pending: self.pending.len(),
            sent_total: self.sent_total,
            failed_total: self.failed_total,
            last_cycle_at: self.last_cycle_at,
        });
    }
}
