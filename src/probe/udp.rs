//! Best-effort UDP probing
//!
//! UDP has no handshake, so a silent port cannot be told apart from a
//! firewalled one; those report as `open|filtered`. The socket is
//! connected before the probe so an ICMP port-unreachable reply surfaces
//! as `ConnectionRefused` and can be classified `closed`.

use crate::probe::{PortStatus, ProbeResult};
use crate::services;
use log::debug;
use std::io;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Sequential UDP probe scanner
#[derive(Debug, Clone)]
pub struct UdpProber {
    timeout: Duration,
}

impl UdpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Probe every port in `ports` against `target`, one at a time.
    ///
    /// Every port yields exactly one result; a send failure on one port
    /// never aborts the remainder of the scan.
    pub async fn scan(&self, target: &str, ports: &[u16]) -> Vec<ProbeResult> {
        debug!(
            "udp scan: {} ports against {} (timeout {:?})",
            ports.len(),
            target,
            self.timeout
        );

        let mut results = Vec::with_capacity(ports.len());
        for &port in ports {
            let status = self.classify(target, port).await;
            let result = ProbeResult::new(target, port, status);
            let result = match status {
                PortStatus::Open => match services::udp_service(port) {
                    Some(name) => result.with_service(name),
                    None => result,
                },
                _ => result,
            };
            results.push(result);
        }

        results.sort_by_key(|r| r.port);
        results
    }

    async fn classify(&self, target: &str, port: u16) -> PortStatus {
        let socket = match UdpSocket::bind(("0.0.0.0", 0)).await {
            Ok(socket) => socket,
            Err(_) => return PortStatus::OpenFiltered,
        };

        if let Err(e) = socket.connect((target, port)).await {
            return refused_or_ambiguous(&e);
        }

        // empty datagram; receipt of anything at all counts as open
        if let Err(e) = socket.send(&[]).await {
            return refused_or_ambiguous(&e);
        }

        let mut buf = [0u8; 1024];
        match tokio::time::timeout(self.timeout, socket.recv(&mut buf)).await {
            Ok(Ok(_)) => PortStatus::Open,
            Ok(Err(e)) => refused_or_ambiguous(&e),
            // silence: open-but-quiet and firewalled are indistinguishable
            Err(_) => PortStatus::OpenFiltered,
        }
    }
}

fn refused_or_ambiguous(e: &io::Error) -> PortStatus {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        PortStatus::Closed
    } else {
        PortStatus::OpenFiltered
    }
}
