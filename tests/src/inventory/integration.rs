#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tmd_common::config::SweepConfig;
use tmd_common::inventory::{DeviceKind, OperStatus};
use tmd_common::snmp::RawValue;
use tmd_core::inventory::InventoryBuilder;
use tmd_core::sweep::{SweepCoordinator, SweepReport};

use crate::mock::{AgentView, ListedReachability, ScriptedAgent};

const HOST_A: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);
const HOST_B: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 11);
const HOST_C: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 12);

const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
const SYS_CONTACT: &str = "1.3.6.1.2.1.1.4.0";
const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

fn fast_config() -> SweepConfig {
    SweepConfig {
        timeout: Duration::from_millis(100),
        retries: 0,
        workers: 8,
        host_fanout: 5,
        ..SweepConfig::default()
    }
}

async fn run_sweep(
    agent: ScriptedAgent,
    reachability: ListedReachability,
    config: &SweepConfig,
    candidates: Vec<Ipv4Addr>,
) -> SweepReport {
    let builder = InventoryBuilder::new(Arc::new(agent), Arc::new(reachability), config);
    SweepCoordinator::new(builder, config.workers)
        .sweep(candidates, None)
        .await
}

/// Sweeps with every host reachable.
async fn sweep_all_up(agent: ScriptedAgent, candidates: Vec<Ipv4Addr>) -> SweepReport {
    let reachability = ListedReachability::all_up();
    run_sweep(agent, reachability, &fast_config(), candidates).await
}

/// Router-like view with interfaces 1, 2 and 10 plus one anonymous row.
fn router() -> AgentView {
    AgentView::new()
        .text(SYS_NAME, "gw-core")
        .with(SYS_UPTIME, RawValue::TimeTicks(360_000))
        .text("1.3.6.1.2.1.2.2.1.2.1", "lo")
        .text("1.3.6.1.2.1.2.2.1.2.2", "eth0")
        .text("1.3.6.1.2.1.2.2.1.2.10", "eth8")
        .hex("1.3.6.1.2.1.2.2.1.6.2", "00 1A 2B 3C 4D 5E")
        .hex("1.3.6.1.2.1.2.2.1.6.10", "00 1A 2B 3C 4D 6F")
        .with("1.3.6.1.2.1.2.2.1.8.1", RawValue::Integer(1))
        .with("1.3.6.1.2.1.2.2.1.8.2", RawValue::Integer(2))
        .with("1.3.6.1.2.1.2.2.1.8.7", RawValue::Integer(1))
        .with("1.3.6.1.2.1.2.2.1.8.10", RawValue::Integer(3))
        .with("1.3.6.1.2.1.4.1.0", RawValue::Integer(2))
}

#[tokio::test]
async fn unreachable_host_is_skipped_and_partial_host_is_kept() {
    let agent = ScriptedAgent::new().host(
        HOST_B,
        AgentView::new()
            .text(SYS_NAME, "printer-2f")
            .text(SYS_DESCR, "STRING: \"Office printer\""),
    );
    let reachability = ListedReachability::all_up().down(HOST_A);

    let report = run_sweep(agent, reachability, &fast_config(), vec![HOST_A, HOST_B]).await;

    assert_eq!(report.devices.len(), 1);
    assert_eq!(report.unreachable, vec![HOST_A]);

    let device = &report.devices[0];
    assert_eq!(device.ip, HOST_B);
    assert_eq!(device.sys_name.as_deref(), Some("printer-2f"));
    assert_eq!(device.sys_descr.as_deref(), Some("Office printer"));
    assert_eq!(device.sys_location, None);
    assert_eq!(device.sys_contact, None);
    assert_eq!(device.uptime, None);
    assert_eq!(device.location_or_sentinel(), "not available");
}

#[tokio::test]
async fn host_without_any_system_field_is_rejected() {
    let agent = ScriptedAgent::new().host(HOST_A, AgentView::new());

    let report = sweep_all_up(agent, vec![HOST_A]).await;

    assert!(report.devices.is_empty());
    assert_eq!(report.empty, vec![HOST_A]);
    assert!(report.unreachable.is_empty());
}

#[tokio::test]
async fn single_resolved_field_is_accepted() {
    let view = AgentView::new().text(SYS_CONTACT, "ops@lan");
    let agent = ScriptedAgent::new().host(HOST_A, view);

    let report = sweep_all_up(agent, vec![HOST_A]).await;

    assert_eq!(report.devices.len(), 1);
    assert_eq!(report.devices[0].sys_contact.as_deref(), Some("ops@lan"));
    assert!(report.devices[0].interfaces.is_empty());
}

#[tokio::test]
async fn silent_host_costs_one_deadline_not_one_per_field() {
    let config = fast_config();
    let agent = ScriptedAgent::new()
        .host(HOST_A, router())
        .latency(Duration::from_millis(5));

    let start = Instant::now();
    let report = run_sweep(
        agent,
        ListedReachability::all_up(),
        &config,
        vec![HOST_A, HOST_C],
    )
    .await;
    let elapsed = start.elapsed();

    assert_eq!(report.devices.len(), 1);
    assert_eq!(report.empty, vec![HOST_C]);
    // five concurrent scalars on the silent host, each bounded by one deadline
    let bound = config.query_options().deadline() + Duration::from_millis(400);
    assert!(elapsed < bound, "sweep took {elapsed:?}, bound {bound:?}");
}

#[tokio::test]
async fn interfaces_are_grouped_and_ordered_numerically() {
    let agent = ScriptedAgent::new().host(HOST_A, router());

    let report = sweep_all_up(agent, vec![HOST_A]).await;
    let device = &report.devices[0];

    assert_eq!(device.interfaces.indices(), vec![1, 2, 10]);

    let eth0 = device.interfaces.get(2).unwrap();
    assert_eq!(eth0.name.as_deref(), Some("eth0"));
    assert_eq!(eth0.mac.as_deref(), Some("00:1a:2b:3c:4d:5e"));
    assert_eq!(eth0.status, OperStatus::Down);

    assert_eq!(
        device.interfaces.get(10).unwrap().status,
        OperStatus::Testing
    );
    assert!(device.interfaces.get(7).is_none());
    assert_eq!(device.uptime.map(|u| u.hours), Some(1));
}

#[tokio::test]
async fn broken_walk_keeps_the_rows_before_the_failure() {
    let view = router().breaks_after("1.3.6.1.2.1.2.2.1.2.2");
    let agent = ScriptedAgent::new().host(HOST_A, view);

    let report = sweep_all_up(agent, vec![HOST_A]).await;
    let device = &report.devices[0];

    assert_eq!(device.sys_name.as_deref(), Some("gw-core"));
    assert_eq!(device.interfaces.indices(), vec![1, 2]);
    assert_eq!(device.interfaces.get(2).unwrap().mac, None);
    assert_eq!(
        device.interfaces.get(2).unwrap().status,
        OperStatus::Unknown
    );
}

#[tokio::test]
async fn worker_pool_bounds_hosts_in_flight() {
    let hosts: Vec<Ipv4Addr> = (1..=12).map(|n| Ipv4Addr::new(10, 1, 1, n)).collect();
    let reachability = Arc::new(ListedReachability::all_up().hold(Duration::from_millis(20)));
    let config = SweepConfig {
        workers: 3,
        ..fast_config()
    };

    let agent = hosts.iter().fold(ScriptedAgent::new(), |agent, ip| {
        agent.host(*ip, AgentView::new().text(SYS_NAME, "node"))
    });
    let builder = InventoryBuilder::new(Arc::new(agent), reachability.clone(), &config);
    let report = SweepCoordinator::new(builder, config.workers)
        .sweep(hosts.clone(), None)
        .await;

    assert_eq!(report.devices.len(), hosts.len());
    assert!(reachability.peak() <= 3, "peak {}", reachability.peak());
    let ips: Vec<Ipv4Addr> = report.devices.iter().map(|d| d.ip).collect();
    assert_eq!(ips, hosts);
}

#[tokio::test]
async fn rejected_hosts_are_never_walked() {
    let agent = Arc::new(ScriptedAgent::new().host(HOST_A, AgentView::new()));
    let reachability = Arc::new(ListedReachability::all_up());
    let builder = InventoryBuilder::new(agent.clone(), reachability, &fast_config());

    let outcome = builder.inventory(HOST_A).await;

    assert!(outcome.is_err());
    assert_eq!(agent.queries(), 5);
}

#[tokio::test]
async fn blank_answers_are_rejected_as_empty() {
    let view = AgentView::new()
        .text(SYS_NAME, "")
        .text(SYS_DESCR, "\"\"")
        .text(SYS_CONTACT, "   ");
    let agent = ScriptedAgent::new().host(HOST_A, view);

    let report = sweep_all_up(agent, vec![HOST_A]).await;

    assert!(report.devices.is_empty(), "devices {:?}", report.devices);
    assert_eq!(report.empty, vec![HOST_A]);
}

#[tokio::test]
async fn linux_hosts_are_classified_as_pcs() {
    let nas = AgentView::new().text(SYS_DESCR, "Linux nas 6.1.0 x86_64");
    let agent = ScriptedAgent::new().host(HOST_A, nas).host(HOST_B, router());

    let report = sweep_all_up(agent, vec![HOST_A, HOST_B]).await;
    let kinds: Vec<DeviceKind> = report.devices.iter().map(|d| d.kind).collect();

    assert_eq!(kinds, vec![DeviceKind::Pc, DeviceKind::Other]);
}
