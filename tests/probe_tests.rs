//! Probe engine behavior against local sockets

use portsweep::probe::{PortStatus, TcpProber, UdpProber};
use std::collections::HashSet;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};

const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Bind a listener on an ephemeral port and keep it alive for the test.
async fn local_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// An ephemeral port with nothing listening on it.
async fn vacant_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn tcp_classifies_open_and_closed() {
    let (_listener, open_port) = local_listener().await;
    let closed_port = vacant_port().await;

    let prober = TcpProber::new(PROBE_TIMEOUT, 16);
    let results = prober.scan("127.0.0.1", &[open_port, closed_port]).await;

    assert_eq!(results.len(), 2);
    let open = results.iter().find(|r| r.port == open_port).unwrap();
    let closed = results.iter().find(|r| r.port == closed_port).unwrap();
    assert_eq!(open.status, PortStatus::Open);
    assert_eq!(closed.status, PortStatus::Closed);
}

#[tokio::test]
async fn tcp_yields_one_result_per_port_with_valid_status() {
    let ports: Vec<u16> = (20000..20040).collect();
    let prober = TcpProber::new(PROBE_TIMEOUT, 8);
    let results = prober.scan("127.0.0.1", &ports).await;

    assert_eq!(results.len(), ports.len());
    for result in &results {
        assert!(matches!(
            result.status,
            PortStatus::Open | PortStatus::Closed | PortStatus::Filtered
        ));
    }
}

#[tokio::test]
async fn tcp_output_is_sorted_regardless_of_submission_order() {
    let mut ports: Vec<u16> = (21000..21064).collect();
    ports.reverse();

    let prober = TcpProber::new(PROBE_TIMEOUT, 32);
    let results = prober.scan("127.0.0.1", &ports).await;

    let returned: Vec<u16> = results.iter().map(|r| r.port).collect();
    let mut expected = ports.clone();
    expected.sort_unstable();
    assert_eq!(returned, expected);
}

#[tokio::test]
async fn tcp_fan_out_loses_no_writes() {
    let ports: Vec<u16> = (30000..30500).collect();
    let prober = TcpProber::new(PROBE_TIMEOUT, 128);
    let results = prober.scan("127.0.0.1", &ports).await;

    assert_eq!(results.len(), 500);
    let unique: HashSet<u16> = results.iter().map(|r| r.port).collect();
    assert_eq!(unique.len(), 500);
}

#[tokio::test]
async fn tcp_unresolvable_host_is_filtered_not_fatal() {
    let prober = TcpProber::new(PROBE_TIMEOUT, 4);
    let results = prober.scan("portsweep-probe.invalid", &[80, 443]).await;

    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.status, PortStatus::Filtered);
    }
}

#[tokio::test]
async fn tcp_open_port_gets_service_label() {
    let (_listener, open_port) = local_listener().await;
    let prober = TcpProber::new(PROBE_TIMEOUT, 4);
    let results = prober.scan("127.0.0.1", &[open_port]).await;

    // ephemeral ports are not in the well-known table
    assert_eq!(results[0].service, "unknown");
    assert_eq!(results[0].ip, "127.0.0.1");
}

#[tokio::test]
async fn udp_responding_port_is_open() {
    let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = responder.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut buf = [0u8; 64];
        if let Ok((_, peer)) = responder.recv_from(&mut buf).await {
            let _ = responder.send_to(b"pong", peer).await;
        }
    });

    let prober = UdpProber::new(PROBE_TIMEOUT);
    let results = prober.scan("127.0.0.1", &[port]).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, PortStatus::Open);
}

#[tokio::test]
async fn udp_silent_bound_port_is_ambiguous() {
    // bound but never answering: no ICMP refusal, no reply
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = silent.local_addr().unwrap().port();

    let prober = UdpProber::new(Duration::from_millis(300));
    let results = prober.scan("127.0.0.1", &[port]).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, PortStatus::OpenFiltered);
}

#[tokio::test]
async fn udp_yields_one_result_per_port_with_valid_status() {
    let ports: Vec<u16> = (40000..40010).collect();
    let prober = UdpProber::new(Duration::from_millis(200));
    let results = prober.scan("127.0.0.1", &ports).await;

    assert_eq!(results.len(), ports.len());
    for result in &results {
        assert!(matches!(
            result.status,
            PortStatus::Open | PortStatus::OpenFiltered | PortStatus::Closed
        ));
    }
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn repeated_scans_do_not_leak_descriptors() {
    fn fd_count() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    let prober = TcpProber::new(PROBE_TIMEOUT, 64);
    // warm up runtime/reactor descriptors first
    prober.scan("127.0.0.1", &(25000..25100).collect::<Vec<u16>>()).await;

    let before = fd_count();
    for _ in 0..5 {
        let results = prober
            .scan("127.0.0.1", &(25000..25100).collect::<Vec<u16>>())
            .await;
        assert_eq!(results.len(), 100);
    }
    let after = fd_count();

    assert!(
        after <= before + 8,
        "descriptor growth: {} -> {}",
        before,
        after
    );
}
