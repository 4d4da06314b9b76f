//! PharmaChain: the collaborator interface over ledger and simulation.
//!
//! An API layer holds one `PharmaChain` and routes business events,
//! chain queries, and simulation control through it.

use std::sync::Arc;
use std::time::Duration;

use pharmachain_core::{Block, ChainHead};
use pharmachain_sim::{NullSink, SimError, SimulationController, SimulationStatus, TelemetrySink};
use pharmachain_store::{FileLedger, Ledger};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::config::PharmaConfig;
use crate::error::{PharmaError, Result};

/// Event type of batch registration blocks.
pub const REGISTER_BATCH_EVENT: &str = "REGISTER_BATCH";

/// The main PharmaChain service.
pub struct PharmaChain {
    /// The ledger every append goes through.
    ledger: Arc<dyn Ledger>,
    /// Owner of the background generator.
    simulation: SimulationController,
    config: PharmaConfig,
}

impl PharmaChain {
    /// Open a file-backed ledger per `config`. Telemetry is discarded.
    pub fn open(config: PharmaConfig) -> Self {
        Self::with_sink(config, Arc::new(NullSink))
    }

    /// Open a file-backed ledger, reporting shipments and readings to `sink`.
    pub fn with_sink(config: PharmaConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        let ledger = Arc::new(FileLedger::open(config.ledger.clone()));
        Self::with_parts(ledger, sink, config)
    }

    /// Assemble from an arbitrary ledger and sink.
    pub fn with_parts(
        ledger: Arc<dyn Ledger>,
        sink: Arc<dyn TelemetrySink>,
        config: PharmaConfig,
    ) -> Self {
        let simulation =
            SimulationController::new(Arc::clone(&ledger), sink, config.simulation.clone());
        Self {
            ledger,
            simulation,
            config,
        }
    }

    pub fn config(&self) -> &PharmaConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    pub fn simulation(&self) -> &SimulationController {
        &self.simulation
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a business event and return the new block.
    pub async fn register_event<T: Serialize + ?Sized>(
        &self,
        event_type: &str,
        payload: &T,
    ) -> Result<Block> {
        let payload =
            serde_json::to_value(payload).map_err(|e| PharmaError::InvalidPayload(e.to_string()))?;
        let block = self.ledger.append(event_type, payload).await?;
        debug!(index = block.index, event_type, "registered event");
        Ok(block)
    }

    /// Record a manufactured batch.
    pub async fn register_batch(&self, batch_id: &str, manufacturer: &str) -> Result<Block> {
        self.register_event(
            REGISTER_BATCH_EVENT,
            &json!({"batchId": batch_id, "manufacturer": manufacturer}),
        )
        .await
    }

    /// The `limit` most recent blocks, oldest first.
    pub async fn get_chain_tail(&self, limit: usize) -> Result<Vec<Block>> {
        Ok(self.ledger.read(limit).await?)
    }

    /// Re-verify the persisted chain end to end.
    pub async fn verify_chain(&self) -> Result<ChainHead> {
        Ok(self.ledger.verify().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Simulation Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Start the telemetry simulation and return its roster.
    pub async fn start_simulation(
        &self,
        shipment_count: usize,
        interval_secs: f64,
    ) -> Result<Vec<String>> {
        let interval = Duration::try_from_secs_f64(interval_secs).map_err(|_| {
            SimError::InvalidArgument(format!("invalid tick interval {interval_secs}s"))
        })?;
        Ok(self.simulation.start(shipment_count, interval).await?)
    }

    /// Start with the configured roster size and interval.
    pub async fn start_default_simulation(&self) -> Result<Vec<String>> {
        Ok(self.simulation.start_default().await?)
    }

    /// Stop the simulation if it is running.
    pub async fn stop_simulation(&self) {
        self.simulation.stop().await
    }

    pub async fn simulation_status(&self) -> SimulationStatus {
        self.simulation.status().await
    }
}
