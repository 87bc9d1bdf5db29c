//! Backend selection
//!
//! A scan is either delegated to an installed nmap binary or served by the
//! built-in probers. Availability of nmap is detected once per process and
//! cached; the selector hands out trait objects so tests can force either
//! path without touching the cached flag.

pub mod nmap;

use crate::config::ScanConfig;
use crate::probe::{ProbeResult, ScanKind, TcpProber, UdpProber};
use crate::Result;
use futures::future::BoxFuture;
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::process::{Command, Stdio};

pub use nmap::NmapBackend;

static NMAP_AVAILABLE: OnceCell<bool> = OnceCell::new();

/// Whether an nmap binary is usable in this environment.
///
/// Computed once per process lifetime; there is no re-detection. Any
/// failure to spawn or probe the binary is a quiet "no".
pub fn nmap_available() -> bool {
    *NMAP_AVAILABLE.get_or_init(|| {
        let available = Command::new("nmap")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);

        if available {
            info!("nmap detected, scans will be delegated");
        } else {
            info!("nmap not found, using built-in probers");
        }
        available
    })
}

/// A scanning strategy: delegated nmap or the built-in probe engines.
pub trait ScanBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Scan the configured target and return one result per reported port.
    fn scan<'a>(&'a self, config: &'a ScanConfig) -> BoxFuture<'a, Result<Vec<ProbeResult>>>;
}

/// Fallback backend probing with plain sockets
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinBackend;

impl ScanBackend for BuiltinBackend {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn scan<'a>(&'a self, config: &'a ScanConfig) -> BoxFuture<'a, Result<Vec<ProbeResult>>> {
        Box::pin(async move {
            let timeout = config.timeout_duration();
            let results = match config.kind {
                ScanKind::Tcp => {
                    TcpProber::new(timeout, config.concurrency)
                        .scan(&config.target, &config.ports)
                        .await
                }
                ScanKind::Udp => {
                    UdpProber::new(timeout)
                        .scan(&config.target, &config.ports)
                        .await
                }
            };
            Ok(results)
        })
    }
}

/// Pick the scanning backend for this process.
pub fn select_backend(force_builtin: bool) -> Box<dyn ScanBackend> {
    if !force_builtin && nmap_available() {
        debug!("backend: nmap");
        Box::new(NmapBackend::default())
    } else {
        debug!("backend: builtin");
        Box::new(BuiltinBackend)
    }
}
