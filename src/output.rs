//! Output formatting for scan reports

use crate::probe::{PortStatus, ProbeResult, ScanKind};
use crate::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// One completed scan, ready for rendering or serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: String,
    pub kind: ScanKind,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub results: Vec<ProbeResult>,
}

impl ScanReport {
    pub fn new(
        target: impl Into<String>,
        kind: ScanKind,
        duration: Duration,
        results: Vec<ProbeResult>,
    ) -> Self {
        Self {
            target: target.into(),
            kind,
            started_at: Utc::now(),
            duration_ms: duration.as_millis() as u64,
            results,
        }
    }

    pub fn open_count(&self) -> usize {
        self.count(PortStatus::Open)
    }

    pub fn closed_count(&self) -> usize {
        self.count(PortStatus::Closed)
    }

    /// Ports that are neither provably open nor provably closed.
    pub fn ambiguous_count(&self) -> usize {
        self.results.len() - self.open_count() - self.closed_count()
    }

    fn count(&self, status: PortStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::ScanError::Output(format!("report serialization failed: {}", e)))
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }
}

fn colorize_status(status: PortStatus) -> colored::ColoredString {
    match status {
        PortStatus::Open => status.as_str().bright_green().bold(),
        PortStatus::Closed => status.as_str().bright_red(),
        _ => status.as_str().bright_yellow(),
    }
}

/// Render the report as a port table with a summary line.
pub fn print_text(report: &ScanReport, show_closed: bool) {
    println!(
        "{} {} scan report for {}",
        "[~]".bright_blue(),
        report.kind,
        report.target.bright_cyan().bold()
    );

    println!("{:<12} {:<16} SERVICE", "PORT", "STATE");
    for result in &report.results {
        if !show_closed && result.status == PortStatus::Closed {
            continue;
        }
        println!(
            "{:<12} {:<16} {}",
            format!("{}/{}", result.port, report.kind),
            colorize_status(result.status),
            result.service
        );
    }

    println!(
        "{} {} ports scanned in {:.2}s: {} open, {} closed, {} ambiguous",
        "[~]".bright_blue(),
        report.results.len(),
        report.duration_ms as f64 / 1000.0,
        report.open_count().to_string().bright_green(),
        report.closed_count(),
        report.ambiguous_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_status() {
        let results = vec![
            ProbeResult::new("127.0.0.1", 22, PortStatus::Open),
            ProbeResult::new("127.0.0.1", 23, PortStatus::Closed),
            ProbeResult::new("127.0.0.1", 24, PortStatus::OpenFiltered),
            ProbeResult::new("127.0.0.1", 25, PortStatus::Filtered),
        ];
        let report = ScanReport::new("127.0.0.1", ScanKind::Tcp, Duration::from_millis(10), results);

        assert_eq!(report.open_count(), 1);
        assert_eq!(report.closed_count(), 1);
        assert_eq!(report.ambiguous_count(), 2);
    }

    #[test]
    fn json_report_carries_wire_statuses() {
        let results = vec![ProbeResult::new("10.0.0.1", 53, PortStatus::OpenFiltered)];
        let report = ScanReport::new("10.0.0.1", ScanKind::Udp, Duration::from_millis(5), results);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"open|filtered\""));
        assert!(json.contains("\"udp\""));
    }
}
