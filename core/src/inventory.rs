//! # Device Inventory Builder
//!
//! Turns one candidate address into zero or one [`Device`]:
//!
//! 1. **Liveness**: asks the [`Reachability`] port first; a silent host is rejected.
//! 2. **Scalars**: queries the five `system` fields concurrently.
//! 3. **Acceptance**: a host where none of them resolved is rejected.
//! 4. **Interfaces**: walks `ifEntry` and assembles the table, then resolves vendors.
//!
//! Only the first and third steps can reject a host. Every query failure
//! below that is absorbed into a "not available" field or an empty table.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tmd_common::config::{QueryOptions, SweepConfig};
use tmd_common::inventory::{Device, InterfaceTable, Rejection, SystemInfo};
use tmd_common::snmp::QueryResult;
use tmd_common::snmp::mib::{self, SystemField};
use tmd_protocols::{SnmpClient, Walk};
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::assemble::InterfaceAssembler;
use crate::normalize::{normalize, normalize_uptime};
use crate::reachability::Reachability;
use crate::vendors::{VendorRepository, enrich_vendors};

pub struct InventoryBuilder {
    client: Arc<dyn SnmpClient>,
    reachability: Arc<dyn Reachability>,
    vendors: Option<Arc<dyn VendorRepository>>,
    opts: QueryOptions,
    host_fanout: usize,
    max_walk_rows: usize,
}

impl InventoryBuilder {
    pub fn new(
        client: Arc<dyn SnmpClient>,
        reachability: Arc<dyn Reachability>,
        config: &SweepConfig,
    ) -> Self {
        Self {
            client,
            reachability,
            vendors: None,
            opts: config.query_options(),
            host_fanout: config.host_fanout.max(1),
            max_walk_rows: config.max_walk_rows,
        }
    }

    pub fn with_vendors(mut self, vendors: Arc<dyn VendorRepository>) -> Self {
        self.vendors = Some(vendors);
        self
    }

    /// Runs the whole per-host pipeline.
    ///
    /// The returned [`Device`] is complete: nothing about it changes after
    /// this call returns.
    pub async fn inventory(&self, ip: Ipv4Addr) -> Result<Device, Rejection> {
        if !self.reachability.is_reachable(ip).await {
            debug!(%ip, "unreachable");
            return Err(Rejection::Unreachable);
        }

        let fanout = Semaphore::new(self.host_fanout);
        let info = self.system_info(ip, &fanout).await;
        trace!(%ip, resolved = info.resolved_count(), "scalar phase done");

        let device = Device::from_system(ip, info)?;
        let interfaces = self.interfaces(ip, &fanout).await;

        Ok(device.with_interfaces(interfaces))
    }

    /// Issues the five scalar queries together. A failure on one never
    /// holds back the others.
    pub async fn system_info(&self, ip: Ipv4Addr, fanout: &Semaphore) -> SystemInfo {
        let (descr, name, location, uptime, contact) = tokio::join!(
            self.fetch(ip, SystemField::Description, fanout),
            self.fetch(ip, SystemField::Name, fanout),
            self.fetch(ip, SystemField::Location, fanout),
            self.fetch(ip, SystemField::Uptime, fanout),
            self.fetch(ip, SystemField::Contact, fanout),
        );

        SystemInfo {
            descr: normalize(descr),
            name: normalize(name),
            location: normalize(location),
            uptime: normalize_uptime(uptime),
            contact: normalize(contact),
        }
    }

    /// Walks `ifEntry` row by row into an assembler. A failed or truncated
    /// walk keeps whatever rows arrived before it stopped.
    pub async fn interfaces(&self, ip: Ipv4Addr, fanout: &Semaphore) -> InterfaceTable {
        let _permit = fanout.acquire().await.ok();

        let mut walk = Walk::new(
            self.client.as_ref(),
            ip,
            mib::if_entry(),
            &self.opts,
            self.max_walk_rows,
        );
        let mut assembler = InterfaceAssembler::new();
        while let Some((oid, value)) = walk.next_row().await {
            assembler.push(&oid, value);
        }

        if let Some(end) = walk.end().filter(|end| end.is_failure()) {
            debug!(%ip, reason = ?end, "interface walk cut short");
        }

        let mut table = assembler.finish();
        if let Some(vendors) = &self.vendors {
            enrich_vendors(&mut table, vendors.as_ref());
        }
        table
    }

    async fn fetch(&self, ip: Ipv4Addr, field: SystemField, fanout: &Semaphore) -> QueryResult {
        let _permit = fanout.acquire().await.ok();
        let result = self.client.get(ip, &field.identifier(), &self.opts).await;
        if let Err(e) = &result {
            debug!(%ip, field = field.label(), "query failed: {e}");
        }
        result
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
