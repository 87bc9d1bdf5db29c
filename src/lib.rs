//! portsweep - a concurrent TCP/UDP port scanning engine
//!
//! Delegates to an installed `nmap` binary when one is available and falls
//! back to built-in connect/datagram probing when it is not.

pub mod backend;
pub mod config;
pub mod error;
pub mod output;
pub mod ports;
pub mod probe;
pub mod scanner;
pub mod services;

// Re-export commonly used types
pub use backend::{nmap_available, select_backend, BuiltinBackend, ScanBackend};
pub use config::ScanConfig;
pub use error::ScanError;
pub use ports::parse_ports;
pub use probe::{PortStatus, ProbeResult, ScanKind};
pub use scanner::{run_scan, ScanEngine};

pub type Result<T> = std::result::Result<T, ScanError>;
