//! In-memory stand-ins for the network-facing ports.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tmd_common::config::QueryOptions;
use tmd_common::snmp::{Identifier, QueryError, QueryResult, RawValue};
use tmd_core::reachability::Reachability;
use tmd_protocols::SnmpClient;

/// The MIB view of one simulated agent.
#[derive(Default, Clone)]
pub struct AgentView {
    rows: BTreeMap<Identifier, RawValue>,
    /// get-next past this identifier times out.
    broken_after: Option<Identifier>,
}

impl AgentView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, oid: &str, value: RawValue) -> Self {
        if let Ok(oid) = oid.parse() {
            self.rows.insert(oid, value);
        }
        self
    }

    pub fn text(self, oid: &str, value: &str) -> Self {
        self.with(oid, RawValue::PlainString(value.to_string()))
    }

    pub fn hex(self, oid: &str, value: &str) -> Self {
        self.with(oid, RawValue::HexOctets(value.to_string()))
    }

    pub fn breaks_after(mut self, oid: &str) -> Self {
        self.broken_after = oid.parse().ok();
        self
    }
}

/// Answers from per-host views. Hosts without a view behave like a
/// device with no agent: every call waits out the full deadline.
#[derive(Default)]
pub struct ScriptedAgent {
    views: HashMap<Ipv4Addr, AgentView>,
    latency: Duration,
    queries: AtomicUsize,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, ip: Ipv4Addr, view: AgentView) -> Self {
        self.views.insert(ip, view);
        self
    }

    /// Delay added to every answered query.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn view(&self, host: Ipv4Addr, opts: &QueryOptions) -> Result<&AgentView, QueryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.views.get(&host) {
            Some(view) => {
                tokio::time::sleep(self.latency).await;
                Ok(view)
            }
            None => {
                tokio::time::sleep(opts.deadline()).await;
                Err(QueryError::Timeout {
                    attempts: opts.attempts(),
                })
            }
        }
    }
}

#[async_trait]
impl SnmpClient for ScriptedAgent {
    async fn get(&self, host: Ipv4Addr, oid: &Identifier, opts: &QueryOptions) -> QueryResult {
        let view = self.view(host, opts).await?;
        view.rows.get(oid).cloned().ok_or(QueryError::Protocol {
            reason: "noSuchObject".to_string(),
        })
    }

    async fn get_next(
        &self,
        host: Ipv4Addr,
        oid: &Identifier,
        opts: &QueryOptions,
    ) -> Result<(Identifier, RawValue), QueryError> {
        let view = self.view(host, opts).await?;
        let (next, value) = view
            .rows
            .range(oid.clone()..)
            .find(|(key, _)| *key > oid)
            .ok_or(QueryError::EndOfMibView)?;

        if view.broken_after.as_ref().is_some_and(|limit| next > limit) {
            return Err(QueryError::Timeout {
                attempts: opts.attempts(),
            });
        }
        Ok((next.clone(), value.clone()))
    }
}

/// Reachability answered from a fixed list, tracking how many probes overlap.
#[derive(Default)]
pub struct ListedReachability {
    down: HashSet<Ipv4Addr>,
    hold: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ListedReachability {
    pub fn all_up() -> Self {
        Self::default()
    }

    pub fn down(mut self, ip: Ipv4Addr) -> Self {
        self.down.insert(ip);
        self
    }

    /// How long each probe takes.
    pub fn hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Most probes ever in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Reachability for ListedReachability {
    async fn is_reachable(&self, ip: Ipv4Addr) -> bool {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.hold).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        !self.down.contains(&ip)
    }
}
