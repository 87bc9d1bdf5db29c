//! Nmap delegation backend
//!
//! Runs the installed nmap binary with a scan-type-appropriate flag and
//! normalizes its XML report into the engine's result shape through typed
//! records. Ports absent from the report are not synthesized; the
//! delegated backend owns completeness semantics.

use crate::backend::ScanBackend;
use crate::config::ScanConfig;
use crate::probe::{PortStatus, ProbeResult, ScanKind};
use crate::{Result, ScanError};
use futures::future::BoxFuture;
use log::{debug, warn};
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Nmap-specific configuration
#[derive(Debug, Clone)]
pub struct NmapConfig {
    /// Path to the nmap binary
    pub nmap_path: String,
    /// Maximum execution time for one nmap run
    pub exec_timeout: Duration,
}

impl Default for NmapConfig {
    fn default() -> Self {
        Self {
            nmap_path: "nmap".to_string(),
            exec_timeout: Duration::from_secs(600),
        }
    }
}

/// Backend delegating scans to the nmap binary
#[derive(Debug, Default)]
pub struct NmapBackend {
    config: NmapConfig,
}

impl NmapBackend {
    pub fn new(config: NmapConfig) -> Self {
        Self { config }
    }

    fn build_args(&self, scan: &ScanConfig) -> Vec<String> {
        let ports = scan
            .ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let technique = match scan.kind {
            ScanKind::Tcp => "-sS",
            ScanKind::Udp => "-sU",
        };

        vec![
            technique.to_string(),
            "-Pn".to_string(),
            "-n".to_string(),
            "-p".to_string(),
            ports,
            "-oX".to_string(),
            "-".to_string(),
            scan.target.clone(),
        ]
    }

    async fn run(&self, scan: &ScanConfig) -> Result<Vec<ProbeResult>> {
        let args = self.build_args(scan);
        debug!("executing {} {:?}", self.config.nmap_path, args);

        let output = timeout(
            self.config.exec_timeout,
            Command::new(&self.config.nmap_path)
                .args(&args)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        .map_err(|_| ScanError::Backend("nmap execution timed out".to_string()))?
        .map_err(|e| ScanError::Backend(format!("failed to execute nmap: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Backend(format!(
                "nmap exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        parse_nmap_xml(&xml, &scan.target, scan.kind)
    }
}

impl ScanBackend for NmapBackend {
    fn name(&self) -> &'static str {
        "nmap"
    }

    fn scan<'a>(&'a self, config: &'a ScanConfig) -> BoxFuture<'a, Result<Vec<ProbeResult>>> {
        Box::pin(self.run(config))
    }
}

// Typed view of the slice of nmap's XML report we consume. Everything
// else in the document is ignored by the deserializer.

#[derive(Debug, Deserialize)]
struct NmapRun {
    #[serde(rename = "host", default)]
    hosts: Vec<NmapHost>,
}

#[derive(Debug, Deserialize)]
struct NmapHost {
    ports: Option<NmapPorts>,
}

#[derive(Debug, Deserialize)]
struct NmapPorts {
    #[serde(rename = "port", default)]
    ports: Vec<NmapPort>,
}

#[derive(Debug, Deserialize)]
struct NmapPort {
    #[serde(rename = "@protocol")]
    protocol: String,
    #[serde(rename = "@portid")]
    portid: u16,
    state: NmapState,
    service: Option<NmapService>,
}

#[derive(Debug, Deserialize)]
struct NmapState {
    #[serde(rename = "@state")]
    state: String,
}

#[derive(Debug, Deserialize)]
struct NmapService {
    #[serde(rename = "@name")]
    name: Option<String>,
}

/// Normalize an nmap XML report into the engine's result shape.
///
/// Only ports matching the requested protocol are kept. Service names
/// default to "unknown"; state strings map through the shared status
/// vocabulary.
pub fn parse_nmap_xml(xml: &str, target: &str, kind: ScanKind) -> Result<Vec<ProbeResult>> {
    let report: NmapRun = quick_xml::de::from_str(xml)
        .map_err(|e| ScanError::Backend(format!("unparseable nmap report: {}", e)))?;

    let mut results = Vec::new();
    for host in &report.hosts {
        let ports = match &host.ports {
            Some(ports) => &ports.ports,
            None => continue,
        };

        for port in ports {
            if port.protocol != kind.as_str() {
                warn!(
                    "nmap reported {}/{} during a {} scan, dropping",
                    port.portid, port.protocol, kind
                );
                continue;
            }

            let service = port
                .service
                .as_ref()
                .and_then(|s| s.name.as_deref())
                .filter(|name| !name.is_empty())
                .unwrap_or("unknown");

            results.push(
                ProbeResult::new(target, port.portid, PortStatus::from_nmap(&port.state.state))
                    .with_service(service),
            );
        }
    }

    results.sort_by_key(|r| r.port);
    Ok(results)
}
