//! The telemetry generator loop.

use std::sync::Arc;
use std::time::Duration;

use pharmachain_core::now_secs;
use pharmachain_store::Ledger;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::sampler::ReadingSource;
use crate::sink::TelemetrySink;

/// Event type of blocks raised for anomalous readings.
pub const ALERT_EVENT: &str = "ALERT";

/// Outcome of one generator tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Readings produced, one per shipment.
    pub readings: usize,
    /// Indices of the `ALERT` blocks appended this tick.
    pub alerts: Vec<u64>,
    /// Anomalies whose `ALERT` append failed.
    pub failed_alerts: usize,
}

/// Produces readings for a fixed roster and raises alerts on the ledger.
pub struct TelemetryGenerator {
    roster: Vec<String>,
    interval: Duration,
    ledger: Arc<dyn Ledger>,
    sink: Arc<dyn TelemetrySink>,
    source: Box<dyn ReadingSource>,
}

impl TelemetryGenerator {
    pub fn new(
        roster: Vec<String>,
        interval: Duration,
        ledger: Arc<dyn Ledger>,
        sink: Arc<dyn TelemetrySink>,
        source: Box<dyn ReadingSource>,
    ) -> Self {
        Self {
            roster,
            interval,
            ledger,
            sink,
            source,
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sample every shipment once.
    ///
    /// Each reading goes to the sink. Anomalous readings additionally get an
    /// `ALERT` block; a failed append is logged and does not end the tick.
    pub async fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for shipment_id in &self.roster {
            let reading = self.source.sample(shipment_id, now_secs());
            self.sink.record_reading(&reading);
            report.readings += 1;

            let Some(anomaly) = reading.anomaly() else {
                continue;
            };

            match self
                .ledger
                .append(ALERT_EVENT, reading.alert_payload())
                .await
            {
                Ok(block) => {
                    info!(
                        shipment = %shipment_id,
                        ?anomaly,
                        temp = reading.temp,
                        index = block.index,
                        "raised alert"
                    );
                    report.alerts.push(block.index);
                }
                Err(e) => {
                    warn!(shipment = %shipment_id, ?anomaly, error = %e, "failed to append alert");
                    report.failed_alerts += 1;
                }
            }
        }

        report
    }

    /// Tick until `shutdown` turns true, sleeping `interval` between ticks.
    ///
    /// A stop request interrupts the sleep. A tick in progress finishes
    /// first. Returns the number of ticks run.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!(
            shipments = self.roster.len(),
            interval = ?self.interval,
            "telemetry generator started"
        );

        let mut ticks = 0u64;
        loop {
            if *shutdown.borrow() {
                break;
            }

            let report = self.tick().await;
            ticks += 1;
            debug!(
                tick = ticks,
                readings = report.readings,
                alerts = report.alerts.len(),
                failed = report.failed_alerts,
                "tick complete"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                // A dropped sender also ends the run.
                _ = shutdown.wait_for(|stop| *stop) => break,
            }
        }

        info!(ticks, "telemetry generator stopped");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use pharmachain_core::{Block, ChainHead};
    use pharmachain_store::{MemoryLedger, StoreError};
    use serde_json::{json, Value};

    /// Returns a fixed temperature for every shipment.
    struct FixedTemp(f64);

    impl ReadingSource for FixedTemp {
        fn sample(&mut self, shipment_id: &str, timestamp: f64) -> Reading {
            Reading {
                shipment_id: shipment_id.to_string(),
                timestamp,
                lat: 12.97,
                lon: 77.59,
                temp: self.0,
                humidity: 40.0,
                pressure: 1008.0,
                tamper: false,
            }
        }
    }

    struct BrokenLedger;

    #[async_trait]
    impl Ledger for BrokenLedger {
        async fn append(&self, _event_type: &str, _payload: Value) -> pharmachain_store::Result<Block> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn read(&self, _limit: usize) -> pharmachain_store::Result<Vec<Block>> {
            Ok(Vec::new())
        }

        async fn verify(&self) -> pharmachain_store::Result<ChainHead> {
            Err(StoreError::Task("unavailable".into()))
        }
    }

    fn generator(
        roster: &[&str],
        temp: f64,
        ledger: Arc<dyn Ledger>,
        sink: Arc<MemorySink>,
    ) -> TelemetryGenerator {
        TelemetryGenerator::new(
            roster.iter().map(|s| s.to_string()).collect(),
            Duration::from_secs(60),
            ledger,
            sink,
            Box::new(FixedTemp(temp)),
        )
    }

    #[tokio::test]
    async fn test_hot_reading_raises_one_alert() {
        let ledger = Arc::new(MemoryLedger::new());
        let sink = Arc::new(MemorySink::new());
        let mut gen = generator(&["S1"], 35.0, ledger.clone(), sink.clone());

        let report = gen.tick().await;
        assert_eq!(report.readings, 1);
        assert_eq!(report.alerts, vec![1]);

        let chain = ledger.read(10).await.unwrap();
        assert_eq!(chain.len(), 2);
        let alert = &chain[1];
        assert_eq!(alert.event_type(), Some(ALERT_EVENT));
        let payload = alert.data.payload().unwrap();
        assert_eq!(payload["shipmentId"], json!("S1"));
        assert_eq!(payload["temp"], json!(35.0));
        assert_eq!(payload["tamper"], json!(false));
        assert_eq!(sink.readings_for("S1").len(), 1);
    }

    #[tokio::test]
    async fn test_normal_reading_appends_nothing() {
        let ledger = Arc::new(MemoryLedger::new());
        let sink = Arc::new(MemorySink::new());
        let mut gen = generator(&["S1", "S2"], 20.0, ledger.clone(), sink.clone());

        let report = gen.tick().await;
        assert_eq!(report.readings, 2);
        assert!(report.alerts.is_empty());
        assert_eq!(ledger.snapshot().unwrap().len(), 0);
        assert_eq!(sink.readings().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_append_does_not_stop_tick() {
        let sink = Arc::new(MemorySink::new());
        let mut gen = generator(&["S1", "S2", "S3"], 35.0, Arc::new(BrokenLedger), sink.clone());

        let report = gen.tick().await;
        assert_eq!(report.readings, 3);
        assert_eq!(report.failed_alerts, 3);
        assert!(report.alerts.is_empty());

        // Still usable after failures.
        assert_eq!(gen.tick().await.failed_alerts, 3);
        assert_eq!(sink.readings().len(), 6);
    }

    #[tokio::test]
    async fn test_stop_interrupts_sleep() {
        let ledger = Arc::new(MemoryLedger::new());
        let sink = Arc::new(MemorySink::new());
        let gen = generator(&["S1"], 20.0, ledger, sink.clone());

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(gen.run(rx));

        while sink.readings().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tx.send(true).unwrap();

        let ticks = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("generator did not stop")
            .unwrap();
        assert_eq!(ticks, 1);
    }

    #[tokio::test]
    async fn test_stop_before_first_tick() {
        let sink = Arc::new(MemorySink::new());
        let gen = generator(&["S1"], 20.0, Arc::new(MemoryLedger::new()), sink.clone());

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        assert_eq!(gen.run(rx).await, 0);
        assert!(sink.readings().is_empty());
    }
}
