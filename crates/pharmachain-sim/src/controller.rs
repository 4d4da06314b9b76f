//! Idle/Running state machine around the telemetry generator.

use std::sync::Arc;
use std::time::Duration;

use pharmachain_store::Ledger;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::generator::TelemetryGenerator;
use crate::sampler::RandomSampler;
use crate::sink::TelemetrySink;

/// Shipment ids for a roster of `count`: `SHIP-SIM-1` through `SHIP-SIM-<count>`.
pub fn shipment_roster(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("SHIP-SIM-{n}")).collect()
}

fn batch_id(n: usize) -> String {
    format!("BATCH-SIM-{n}")
}

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationStatus {
    Idle,
    Running {
        roster: Vec<String>,
        interval: Duration,
    },
}

struct RunHandle {
    roster: Vec<String>,
    interval: Duration,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

/// Runs at most one [`TelemetryGenerator`] at a time.
///
/// The controller owns the roster and the background task; pass it to
/// whatever needs to start or stop the simulation.
pub struct SimulationController {
    ledger: Arc<dyn Ledger>,
    sink: Arc<dyn TelemetrySink>,
    config: SimulationConfig,
    running: Mutex<Option<RunHandle>>,
}

impl SimulationController {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        sink: Arc<dyn TelemetrySink>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            ledger,
            sink,
            config,
            running: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Register a roster of `count` shipments and launch the generator.
    ///
    /// Returns the roster. Fails with [`SimError::AlreadyRunning`] while a
    /// generator is active; the rejected call changes nothing.
    pub async fn start(&self, count: usize, interval: Duration) -> Result<Vec<String>> {
        if count == 0 {
            return Err(SimError::InvalidArgument(
                "shipment count must be at least 1".into(),
            ));
        }
        if interval.is_zero() {
            return Err(SimError::InvalidArgument(
                "tick interval must be positive".into(),
            ));
        }

        let mut running = self.running.lock().await;
        if let Some(handle) = running.as_ref() {
            if !handle.task.is_finished() {
                return Err(SimError::AlreadyRunning);
            }
        }
        // A finished task here ended abnormally; reap it.
        if let Some(stale) = running.take() {
            reap(stale.task).await;
        }

        // Build the sampler before touching the sink so a bad config has no
        // side effects.
        let source = RandomSampler::new(self.config.sampler.clone(), self.config.seed)?;

        let roster = shipment_roster(count);
        for (n, shipment_id) in roster.iter().enumerate() {
            self.sink.record_shipment(shipment_id, &batch_id(n + 1));
        }

        let generator = TelemetryGenerator::new(
            roster.clone(),
            interval,
            Arc::clone(&self.ledger),
            Arc::clone(&self.sink),
            Box::new(source),
        );
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(generator.run(rx));

        info!(shipments = count, ?interval, "simulation started");
        *running = Some(RunHandle {
            roster: roster.clone(),
            interval,
            shutdown,
            task,
        });
        Ok(roster)
    }

    /// Start with the configured default roster size and interval.
    pub async fn start_default(&self) -> Result<Vec<String>> {
        self.start(
            self.config.default_shipment_count,
            self.config.default_interval,
        )
        .await
    }

    /// Signal the generator and wait for it to exit.
    ///
    /// A tick in progress completes first. No-op when idle.
    pub async fn stop(&self) {
        let mut running = self.running.lock().await;
        let Some(handle) = running.take() else {
            return;
        };

        // The receiver may already be gone if the task ended on its own.
        let _ = handle.shutdown.send(true);
        if let Some(ticks) = reap(handle.task).await {
            info!(ticks, "simulation stopped");
        }
    }

    pub async fn status(&self) -> SimulationStatus {
        match self.running.lock().await.as_ref() {
            Some(handle) if !handle.task.is_finished() => SimulationStatus::Running {
                roster: handle.roster.clone(),
                interval: handle.interval,
            },
            _ => SimulationStatus::Idle,
        }
    }

    pub async fn is_running(&self) -> bool {
        matches!(self.status().await, SimulationStatus::Running { .. })
    }
}

async fn reap(task: JoinHandle<u64>) -> Option<u64> {
    match task.await {
        Ok(ticks) => Some(ticks),
        Err(e) => {
            error!(error = %e, "telemetry generator task failed");
            None
        }
    }
}
