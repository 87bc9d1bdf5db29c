//! TCP connect probing
//!
//! One probe future per port, run through a bounded fan-out. Every
//! requested port yields exactly one result; connection errors are
//! classification signals, not failures.

use crate::probe::{PortStatus, ProbeResult};
use crate::services;
use futures::stream::{self, StreamExt};
use log::debug;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// Concurrent TCP connect scanner
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
    concurrency: usize,
}

impl TcpProber {
    pub fn new(timeout: Duration, concurrency: usize) -> Self {
        Self {
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Probe every port in `ports` against `target`.
    ///
    /// All probes for one call run concurrently, bounded by the prober's
    /// concurrency cap, and the call returns only once every probe has
    /// completed or timed out. Results come back sorted by port ascending
    /// regardless of completion order.
    pub async fn scan(&self, target: &str, ports: &[u16]) -> Vec<ProbeResult> {
        debug!(
            "tcp scan: {} ports against {} (timeout {:?}, fan-out {})",
            ports.len(),
            target,
            self.timeout,
            self.concurrency
        );

        let timeout = self.timeout;
        let mut results: Vec<ProbeResult> = stream::iter(ports.iter().copied())
            .map(|port| {
                let target = target.to_string();
                async move { probe_port(&target, port, timeout).await }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results.sort_by_key(|r| r.port);
        results
    }
}

async fn probe_port(target: &str, port: u16, timeout: Duration) -> ProbeResult {
    let status = match tokio::time::timeout(timeout, TcpStream::connect((target, port))).await {
        Ok(Ok(stream)) => {
            // the connection itself is the answer
            drop(stream);
            PortStatus::Open
        }
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => PortStatus::Closed,
        // unreachable, resolution failure, socket error
        Ok(Err(_)) => PortStatus::Filtered,
        // no verdict within the timeout
        Err(_) => PortStatus::Filtered,
    };

    let result = ProbeResult::new(target, port, status);
    match status {
        PortStatus::Open => match services::tcp_service(port) {
            Some(name) => result.with_service(name),
            None => result,
        },
        _ => result,
    }
}
