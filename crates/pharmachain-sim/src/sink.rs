//! The shipment/telemetry collaborator the simulation reports into.
//!
//! Relational storage of shipments and raw readings lives outside the
//! ledger. The simulation only needs a fire-and-forget sink.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::reading::Reading;

/// Receiver for shipment registrations and raw readings.
///
/// Calls are fire-and-forget: implementations log their own failures.
pub trait TelemetrySink: Send + Sync {
    /// Register a shipment. Registering an existing id is a no-op.
    fn record_shipment(&self, shipment_id: &str, batch_id: &str);

    /// Record one raw reading.
    fn record_reading(&self, reading: &Reading);
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record_shipment(&self, _shipment_id: &str, _batch_id: &str) {}

    fn record_reading(&self, _reading: &Reading) {}
}

/// In-memory sink with insert-if-absent shipment registration.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<MemorySinkInner>,
}

#[derive(Debug, Default)]
struct MemorySinkInner {
    /// shipment_id -> batch_id, first registration wins.
    shipments: BTreeMap<String, String>,
    readings: Vec<Reading>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, MemorySinkInner> {
        // Plain data behind the lock; a panicked writer cannot leave it torn.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registered shipments as `(shipment_id, batch_id)`, sorted by id.
    pub fn shipments(&self) -> Vec<(String, String)> {
        self.inner()
            .shipments
            .iter()
            .map(|(s, b)| (s.clone(), b.clone()))
            .collect()
    }

    /// Batch id of a registered shipment.
    pub fn batch_of(&self, shipment_id: &str) -> Option<String> {
        self.inner().shipments.get(shipment_id).cloned()
    }

    /// All recorded readings in arrival order.
    pub fn readings(&self) -> Vec<Reading> {
        self.inner().readings.clone()
    }

    /// Readings for one shipment, oldest first.
    pub fn readings_for(&self, shipment_id: &str) -> Vec<Reading> {
        self.inner()
            .readings
            .iter()
            .filter(|r| r.shipment_id == shipment_id)
            .cloned()
            .collect()
    }
}

impl TelemetrySink for MemorySink {
    fn record_shipment(&self, shipment_id: &str, batch_id: &str) {
        self.inner()
            .shipments
            .entry(shipment_id.to_string())
            .or_insert_with(|| batch_id.to_string());
    }

    fn record_reading(&self, reading: &Reading) {
        self.inner().readings.push(reading.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: &str, temp: f64) -> Reading {
        Reading {
            shipment_id: id.into(),
            timestamp: 1.0,
            lat: 0.0,
            lon: 0.0,
            temp,
            humidity: 40.0,
            pressure: 1008.0,
            tamper: false,
        }
    }

    #[test]
    fn test_duplicate_shipment_is_ignored() {
        let sink = MemorySink::new();
        sink.record_shipment("SHIP-SIM-1", "BATCH-SIM-1");
        sink.record_shipment("SHIP-SIM-1", "BATCH-OTHER");
        assert_eq!(sink.shipments().len(), 1);
        assert_eq!(sink.batch_of("SHIP-SIM-1").as_deref(), Some("BATCH-SIM-1"));
    }

    #[test]
    fn test_readings_filtered_by_shipment() {
        let sink = MemorySink::new();
        sink.record_reading(&reading("A", 20.0));
        sink.record_reading(&reading("B", 21.0));
        sink.record_reading(&reading("A", 22.0));

        let a = sink.readings_for("A");
        assert_eq!(a.iter().map(|r| r.temp).collect::<Vec<_>>(), vec![20.0, 22.0]);
        assert_eq!(sink.readings().len(), 3);
    }
}
