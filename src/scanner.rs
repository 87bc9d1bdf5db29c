//! Scan orchestration
//!
//! The engine ties the pieces together: validate the configuration, hand
//! the scan to a backend, and return results in a deterministic order.

use crate::backend::{select_backend, ScanBackend};
use crate::config::ScanConfig;
use crate::ports::parse_ports;
use crate::probe::{ProbeResult, ScanKind};
use crate::Result;
use log::debug;

/// Orchestrates one scan: configuration, backend dispatch, result ordering.
///
/// Holds no state between invocations; a fresh engine per scan is cheap
/// and engines for different targets may run concurrently.
pub struct ScanEngine {
    config: ScanConfig,
    backend: Box<dyn ScanBackend>,
}

impl ScanEngine {
    /// Create an engine with the backend picked for this process
    /// (nmap when installed, built-in probers otherwise).
    pub fn new(config: ScanConfig) -> Self {
        let backend = select_backend(config.force_builtin);
        Self { config, backend }
    }

    /// Create an engine with an explicit backend. This is the injection
    /// seam: tests use it to force either scanning path.
    pub fn with_backend(config: ScanConfig, backend: Box<dyn ScanBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run the scan to completion.
    ///
    /// Returns results sorted by port ascending regardless of backend or
    /// probe completion order. The only cancellation mechanism is the
    /// per-probe timeout; callers needing a whole-scan deadline should
    /// wrap this call in their own `tokio::time::timeout`.
    pub async fn scan(&self) -> Result<Vec<ProbeResult>> {
        self.config.validate()?;

        debug!(
            "scanning {} ({} ports, {} backend)",
            self.config.target,
            self.config.ports.len(),
            self.backend.name()
        );

        let mut results = self.backend.scan(&self.config).await?;
        // backends are expected to sort; enforce it anyway
        results.sort_by_key(|r| r.port);
        Ok(results)
    }
}

/// Run one scan from the collaborator-facing string inputs.
///
/// `scan_type` accepts `"tcp"` and `"udp"`; anything else falls back to
/// TCP. A malformed `port_spec` is the only surfaced failure for a
/// reachable environment.
pub async fn run_scan(target: &str, scan_type: &str, port_spec: &str) -> Result<Vec<ProbeResult>> {
    let ports = parse_ports(port_spec)?;
    let kind = ScanKind::parse(scan_type);

    let config = ScanConfig::new(target).with_ports(ports).with_kind(kind);
    ScanEngine::new(config).scan().await
}
