use sysinfo::Networks;
use tmd_common::network::traffic::{InterfaceTraffic, TrafficReport};
use tracing::debug;

/// Reads the cumulative counters of the local interfaces.
pub trait TrafficSource: Send + Sync {
    fn counters(&self) -> Vec<InterfaceTraffic>;
}

/// Counters as the operating system reports them since boot.
pub struct SysinfoTraffic;

impl TrafficSource for SysinfoTraffic {
    fn counters(&self) -> Vec<InterfaceTraffic> {
        let networks = Networks::new_with_refreshed_list();
        let mut counters = Vec::new();

        for (name, data) in &networks {
            counters.push(InterfaceTraffic {
                interface: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_received: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_received: data.total_packets_received(),
            });
        }
        counters
    }
}

pub fn local_traffic(source: &dyn TrafficSource) -> TrafficReport {
    let report = TrafficReport::new(source.counters());
    debug!(interfaces = report.interfaces.len(), "traffic counters read");
    report
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
