//! Telemetry readings and anomaly classification.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Readings strictly below this temperature are anomalous.
pub const TEMP_MIN: f64 = 2.0;

/// Readings strictly above this temperature are anomalous.
pub const TEMP_MAX: f64 = 30.0;

/// One synthetic sensor sample for a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub shipment_id: String,
    /// Sample time in epoch seconds.
    pub timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub tamper: bool,
}

/// Why a reading was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    Tamper,
    TemperatureLow,
    TemperatureHigh,
}

impl Reading {
    /// Classify this reading. `None` means normal.
    ///
    /// The tamper flag takes precedence over temperature.
    pub fn anomaly(&self) -> Option<Anomaly> {
        if self.tamper {
            Some(Anomaly::Tamper)
        } else if self.temp < TEMP_MIN {
            Some(Anomaly::TemperatureLow)
        } else if self.temp > TEMP_MAX {
            Some(Anomaly::TemperatureHigh)
        } else {
            None
        }
    }

    pub fn is_anomalous(&self) -> bool {
        self.anomaly().is_some()
    }

    /// Payload of the `ALERT` block raised for this reading.
    pub fn alert_payload(&self) -> Value {
        json!({
            "shipmentId": self.shipment_id,
            "temp": self.temp,
            "tamper": self.tamper,
            "timestamp": self.timestamp,
        })
    }
}
