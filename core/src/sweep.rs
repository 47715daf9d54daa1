//! # Sweep Coordinator
//!
//! Runs the [`InventoryBuilder`] over a stream of candidates with at most
//! `workers` hosts in flight. Candidates are pulled only when a slot frees
//! up, so the [`JoinSet`] never holds more than `workers` tasks. Each
//! finished host is handed back exactly once and the collected devices are
//! sorted by address at the end.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tmd_common::inventory::{Device, Rejection};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::inventory::InventoryBuilder;

/// Called with the number of hosts finished so far.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

#[derive(Debug, Default)]
pub struct SweepReport {
    /// Accepted hosts, ascending by address.
    pub devices: Vec<Device>,
    pub unreachable: Vec<Ipv4Addr>,
    /// Reachable hosts that exposed none of the system fields.
    pub empty: Vec<Ipv4Addr>,
    pub probed: usize,
    pub elapsed: Duration,
}

impl SweepReport {
    fn record(&mut self, ip: Ipv4Addr, outcome: Result<Device, Rejection>) {
        match outcome {
            Ok(device) => self.devices.push(device),
            Err(Rejection::Unreachable) => self.unreachable.push(ip),
            Err(Rejection::EmptyInventory) => self.empty.push(ip),
        }
    }
}

pub struct SweepCoordinator {
    builder: Arc<InventoryBuilder>,
    workers: usize,
}

impl SweepCoordinator {
    pub fn new(builder: InventoryBuilder, workers: usize) -> Self {
        Self {
            builder: Arc::new(builder),
            workers: workers.max(1),
        }
    }

    pub async fn sweep<I>(
        &self,
        candidates: I,
        on_progress: Option<ProgressCallback>,
    ) -> SweepReport
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        let start = Instant::now();
        info!(workers = self.workers, "starting sweep");

        let mut pending = candidates.into_iter();
        let mut tasks = JoinSet::new();
        let mut report = SweepReport::default();

        loop {
            while tasks.len() < self.workers {
                let Some(ip) = pending.next() else { break };
                let builder = Arc::clone(&self.builder);
                tasks.spawn(async move { (ip, builder.inventory(ip).await) });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            report.probed += 1;
            match joined {
                Ok((ip, outcome)) => {
                    debug!(%ip, accepted = outcome.is_ok(), "host finished");
                    report.record(ip, outcome);
                }
                Err(e) => error!("Inventory task failed: {e}"),
            }
            if let Some(cb) = &on_progress {
                cb(report.probed);
            }
        }

        report.devices.sort_by_key(|device| device.ip);
        report.unreachable.sort();
        report.empty.sort();
        report.elapsed = start.elapsed();

        info!(
            devices = report.devices.len(),
            unreachable = report.unreachable.len(),
            empty = report.empty.len(),
            elapsed = ?report.elapsed,
            "sweep finished"
        );
        report
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
