//! Cumulative traffic counters of the local interfaces.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceTraffic {
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
}

impl InterfaceTraffic {
    fn add(&mut self, other: &InterfaceTraffic) {
        self.bytes_sent = self.bytes_sent.saturating_add(other.bytes_sent);
        self.bytes_received = self.bytes_received.saturating_add(other.bytes_received);
        self.packets_sent = self.packets_sent.saturating_add(other.packets_sent);
        self.packets_received = self.packets_received.saturating_add(other.packets_received);
    }
}

/// Per-interface counters, ordered by interface name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrafficReport {
    pub interfaces: Vec<InterfaceTraffic>,
    pub total: InterfaceTraffic,
}

impl TrafficReport {
    pub fn new(mut interfaces: Vec<InterfaceTraffic>) -> Self {
        interfaces.sort_by(|a, b| a.interface.cmp(&b.interface));

        let mut total = InterfaceTraffic {
            interface: "total".to_string(),
            ..InterfaceTraffic::default()
        };
        for interface in &interfaces {
            total.add(interface);
        }

        Self { interfaces, total }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
