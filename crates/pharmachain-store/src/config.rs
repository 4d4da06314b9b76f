//! Ledger configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the chain file.
pub const DEFAULT_LEDGER_PATH: &str = "ledger.json";

/// Default bound on waiting for the ledger lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a ledger store.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Path of the single JSON document holding the chain.
    pub path: PathBuf,
    /// How long an append or read may wait for the lock before failing.
    pub lock_timeout: Duration,
    /// Whether to verify linkage and hashes every time the chain is loaded.
    pub verify_on_load: bool,
}

impl LedgerConfig {
    /// Default configuration with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LEDGER_PATH),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            verify_on_load: true,
        }
    }
}
