//! Probe engines and the shared result model

pub mod tcp;
pub mod udp;

use serde::{Deserialize, Serialize};

pub use tcp::TcpProber;
pub use udp::UdpProber;

/// Scan flavors supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    /// TCP connect scan
    Tcp,
    /// Best-effort UDP probe scan
    Udp,
}

impl ScanKind {
    /// Parse a scan-type string. Unknown or unsupported kinds fall back
    /// to TCP rather than failing.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "udp" => ScanKind::Udp,
            _ => ScanKind::Tcp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Tcp => "tcp",
            ScanKind::Udp => "udp",
        }
    }
}

impl std::fmt::Display for ScanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port status vocabulary
///
/// The built-in probers only ever report `Open`, `Closed`, `Filtered` and
/// `OpenFiltered`; the remaining variants preserve nmap's richer state
/// vocabulary when a scan was delegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "closed")]
    Closed,
    #[serde(rename = "filtered")]
    Filtered,
    #[serde(rename = "open|filtered")]
    OpenFiltered,
    #[serde(rename = "closed|filtered")]
    ClosedFiltered,
    #[serde(rename = "unfiltered")]
    Unfiltered,
}

impl PortStatus {
    /// Map an nmap state string into the status vocabulary. Anything
    /// unrecognized degrades to `Filtered`.
    pub fn from_nmap(state: &str) -> Self {
        match state {
            "open" => PortStatus::Open,
            "closed" => PortStatus::Closed,
            "filtered" => PortStatus::Filtered,
            "open|filtered" => PortStatus::OpenFiltered,
            "closed|filtered" => PortStatus::ClosedFiltered,
            "unfiltered" => PortStatus::Unfiltered,
            _ => PortStatus::Filtered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortStatus::Open => "open",
            PortStatus::Closed => "closed",
            PortStatus::Filtered => "filtered",
            PortStatus::OpenFiltered => "open|filtered",
            PortStatus::ClosedFiltered => "closed|filtered",
            PortStatus::Unfiltered => "unfiltered",
        }
    }
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan result for a single (target, port) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub ip: String,
    pub port: u16,
    pub service: String,
    pub status: PortStatus,
}

impl ProbeResult {
    pub fn new(ip: impl Into<String>, port: u16, status: PortStatus) -> Self {
        Self {
            ip: ip.into(),
            port,
            service: "unknown".to_string(),
            status,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }
}
