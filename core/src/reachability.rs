//! Liveness probes run once per host before any SNMP query.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{trace, warn};

#[async_trait]
pub trait Reachability: Send + Sync {
    async fn is_reachable(&self, ip: Ipv4Addr) -> bool;
}

/// One ICMP echo through the system `ping` binary.
#[derive(Debug, Clone, Copy)]
pub struct PingProbe {
    wait: Duration,
}

impl PingProbe {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    /// `ping -W` takes whole seconds.
    fn wait_secs(&self) -> u64 {
        self.wait.as_secs_f64().ceil().max(1.0) as u64
    }
}

#[async_trait]
impl Reachability for PingProbe {
    async fn is_reachable(&self, ip: Ipv4Addr) -> bool {
        let wait_secs = self.wait_secs();
        let status = Command::new("ping")
            .args(["-c", "1", "-W", &wait_secs.to_string(), &ip.to_string()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        // the child is killed if the outer bound fires first
        let bound = Duration::from_secs(wait_secs) + Duration::from_millis(500);
        match timeout(bound, status).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                warn!("Could not run ping for {ip}: {e}");
                false
            }
            Err(_elapsed) => false,
        }
    }
}

/// TCP connect to a port. A refused connection still proves the host is up.
#[derive(Debug, Clone, Copy)]
pub struct HandshakeProbe {
    port: u16,
    wait: Duration,
}

impl HandshakeProbe {
    pub fn new(port: u16, wait: Duration) -> Self {
        Self { port, wait }
    }
}

#[async_trait]
impl Reachability for HandshakeProbe {
    async fn is_reachable(&self, ip: Ipv4Addr) -> bool {
        let socket_addr = SocketAddr::new(IpAddr::V4(ip), self.port);

        match timeout(self.wait, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                trace!("{socket_addr} answered with {e}");
                e.kind() == std::io::ErrorKind::ConnectionRefused
            }
            Err(_elapsed) => false,
        }
    }
}

/// Skips the liveness check entirely, for networks that drop ICMP.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeReachable;

#[async_trait]
impl Reachability for AssumeReachable {
    async fn is_reachable(&self, _ip: Ipv4Addr) -> bool {
        true
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
