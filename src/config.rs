//! Configuration for scanning operations

use crate::probe::ScanKind;
use crate::{Result, ScanError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for one scan invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Target host to scan (hostname or IP literal)
    pub target: String,

    /// Ports to scan
    pub ports: Vec<u16>,

    /// Scan flavor
    pub kind: ScanKind,

    /// Timeout for each probe attempt in milliseconds
    pub timeout_ms: u64,

    /// Concurrent probe cap for the TCP fan-out
    pub concurrency: usize,

    /// Skip nmap delegation even when the binary is installed
    pub force_builtin: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: "127.0.0.1".to_string(),
            ports: (1..=1024).collect(),
            kind: ScanKind::Tcp,
            timeout_ms: 1000,
            concurrency: 256,
            force_builtin: false,
        }
    }
}

impl ScanConfig {
    /// Create a configuration for the given target with default settings
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Set the ports to scan
    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    /// Set the scan flavor
    pub fn with_kind(mut self, kind: ScanKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the per-probe timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the concurrent probe cap
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Force the built-in probers even when nmap is installed
    pub fn with_force_builtin(mut self, force_builtin: bool) -> Self {
        self.force_builtin = force_builtin;
        self
    }

    /// Get the per-probe timeout as a Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(ScanError::InvalidConfig("target cannot be empty".to_string()));
        }

        if self.ports.is_empty() {
            return Err(ScanError::InvalidConfig("no ports specified".to_string()));
        }

        if self.concurrency == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ScanError::InvalidConfig(format!("failed to read config file: {}", e))
        })?;

        let config: ScanConfig = toml::from_str(&content)
            .map_err(|e| ScanError::InvalidConfig(format!("failed to parse TOML: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from `~/.portsweep.toml`, falling back to defaults
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let config_path = home_dir.join(".portsweep.toml");

        if config_path.exists() {
            if let Ok(config) = Self::from_toml_file(&config_path) {
                info!("loaded config from {}", config_path.display());
                return config;
            }
        }

        Self::default()
    }
}
