//! Top-level configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pharmachain_sim::SimulationConfig;
use pharmachain_store::LedgerConfig;
use tracing::warn;

pub const ENV_LEDGER_PATH: &str = "PHARMACHAIN_LEDGER_PATH";
pub const ENV_LOCK_TIMEOUT_MS: &str = "PHARMACHAIN_LOCK_TIMEOUT_MS";
pub const ENV_VERIFY_ON_LOAD: &str = "PHARMACHAIN_VERIFY_ON_LOAD";
pub const ENV_SIM_INTERVAL_SECS: &str = "PHARMACHAIN_SIM_INTERVAL_SECS";
pub const ENV_SIM_SHIPMENTS: &str = "PHARMACHAIN_SIM_SHIPMENTS";

/// Configuration for [`PharmaChain`](crate::PharmaChain).
#[derive(Debug, Clone, Default)]
pub struct PharmaConfig {
    /// Ledger file and locking.
    pub ledger: LedgerConfig,
    /// Simulation defaults and sensor model.
    pub simulation: SimulationConfig,
}

impl PharmaConfig {
    /// Defaults overridden by `PHARMACHAIN_*` environment variables.
    ///
    /// Unset variables keep their default. Unparsable values are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LEDGER_PATH).filter(|p| !p.trim().is_empty()) {
            config.ledger.path = PathBuf::from(path);
        }
        if let Some(ms) = parsed::<u64>(&lookup, ENV_LOCK_TIMEOUT_MS) {
            config.ledger.lock_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_VERIFY_ON_LOAD) {
            match parse_flag(&raw) {
                Some(verify) => config.ledger.verify_on_load = verify,
                None => warn!(key = ENV_VERIFY_ON_LOAD, value = %raw, "ignoring invalid flag"),
            }
        }
        if let Some(secs) = parsed::<f64>(&lookup, ENV_SIM_INTERVAL_SECS) {
            match Duration::try_from_secs_f64(secs) {
                Ok(interval) if !interval.is_zero() => {
                    config.simulation.default_interval = interval
                }
                _ => warn!(key = ENV_SIM_INTERVAL_SECS, secs, "ignoring non-positive interval"),
            }
        }
        if let Some(count) = parsed::<usize>(&lookup, ENV_SIM_SHIPMENTS) {
            if count == 0 {
                warn!(key = ENV_SIM_SHIPMENTS, "ignoring zero shipment count");
            } else {
                config.simulation.default_shipment_count = count;
            }
        }

        config
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = PharmaConfig::from_lookup(|_| None);
        assert_eq!(config.ledger.path, PathBuf::from("ledger.json"));
        assert_eq!(config.ledger.lock_timeout, Duration::from_secs(5));
        assert!(config.ledger.verify_on_load);
        assert_eq!(config.simulation.default_shipment_count, 3);
        assert_eq!(config.simulation.default_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = PharmaConfig::from_lookup(lookup(&[
            (ENV_LEDGER_PATH, "/var/lib/pharma/chain.json"),
            (ENV_LOCK_TIMEOUT_MS, "250"),
            (ENV_VERIFY_ON_LOAD, "off"),
            (ENV_SIM_INTERVAL_SECS, "0.5"),
            (ENV_SIM_SHIPMENTS, "7"),
        ]));
        assert_eq!(config.ledger.path, PathBuf::from("/var/lib/pharma/chain.json"));
        assert_eq!(config.ledger.lock_timeout, Duration::from_millis(250));
        assert!(!config.ledger.verify_on_load);
        assert_eq!(config.simulation.default_interval, Duration::from_millis(500));
        assert_eq!(config.simulation.default_shipment_count, 7);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = PharmaConfig::from_lookup(lookup(&[
            (ENV_LOCK_TIMEOUT_MS, "soon"),
            (ENV_VERIFY_ON_LOAD, "maybe"),
            (ENV_SIM_INTERVAL_SECS, "-2"),
            (ENV_SIM_SHIPMENTS, "0"),
        ]));
        assert_eq!(config.ledger.lock_timeout, Duration::from_secs(5));
        assert!(config.ledger.verify_on_load);
        assert_eq!(config.simulation.default_interval, Duration::from_secs(2));
        assert_eq!(config.simulation.default_shipment_count, 3);
    }
}
