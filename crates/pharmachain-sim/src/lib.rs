//! # PharmaChain Simulation
//!
//! Synthetic cold-chain telemetry and the anomaly alerts it feeds into the
//! ledger.
//!
//! ## Overview
//!
//! - [`TelemetryGenerator`] samples one [`Reading`] per shipment each tick,
//!   forwards it to a [`TelemetrySink`], and appends an `ALERT` block for
//!   every anomalous reading.
//! - [`SimulationController`] owns the Idle/Running state machine and runs
//!   at most one generator at a time on a background task.
//!
//! A reading is anomalous when the tamper flag is set or the temperature is
//! strictly below 2 or strictly above 30 degrees.

pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod reading;
pub mod sampler;
pub mod sink;

pub use config::{SamplerConfig, SimulationConfig};
pub use controller::{shipment_roster, SimulationController, SimulationStatus};
pub use error::{Result, SimError};
pub use generator::{TelemetryGenerator, TickReport, ALERT_EVENT};
pub use reading::{Anomaly, Reading, TEMP_MAX, TEMP_MIN};
pub use sampler::{RandomSampler, ReadingSource};
pub use sink::{MemorySink, NullSink, TelemetrySink};
