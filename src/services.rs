//! Well-known service name lookup
//!
//! Best-effort labels for common ports. Anything not listed here reports
//! as "unknown"; real service identification belongs to the nmap backend.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static TCP_SERVICES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut services = HashMap::new();

    services.insert(21, "ftp");
    services.insert(22, "ssh");
    services.insert(23, "telnet");
    services.insert(25, "smtp");
    services.insert(53, "domain");
    services.insert(80, "http");
    services.insert(110, "pop3");
    services.insert(111, "rpcbind");
    services.insert(135, "msrpc");
    services.insert(139, "netbios-ssn");
    services.insert(143, "imap");
    services.insert(443, "https");
    services.insert(445, "microsoft-ds");
    services.insert(993, "imaps");
    services.insert(995, "pop3s");
    services.insert(1433, "ms-sql-s");
    services.insert(3306, "mysql");
    services.insert(3389, "ms-wbt-server");
    services.insert(5432, "postgresql");
    services.insert(5984, "couchdb");
    services.insert(6379, "redis");
    services.insert(8080, "http-proxy");
    services.insert(8443, "https-alt");
    services.insert(27017, "mongodb");

    services
});

static UDP_SERVICES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut services = HashMap::new();

    services.insert(53, "domain");
    services.insert(67, "dhcps");
    services.insert(68, "dhcpc");
    services.insert(69, "tftp");
    services.insert(123, "ntp");
    services.insert(137, "netbios-ns");
    services.insert(161, "snmp");
    services.insert(162, "snmptrap");
    services.insert(500, "isakmp");
    services.insert(514, "syslog");
    services.insert(1194, "openvpn");
    services.insert(4500, "ipsec-nat-t");
    services.insert(5353, "mdns");

    services
});

/// Look up the conventional TCP service name for a port.
pub fn tcp_service(port: u16) -> Option<&'static str> {
    TCP_SERVICES.get(&port).copied()
}

/// Look up the conventional UDP service name for a port.
pub fn udp_service(port: u16) -> Option<&'static str> {
    UDP_SERVICES.get(&port).copied()
}
