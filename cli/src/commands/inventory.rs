use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use tmd_common::config::SweepConfig;
use tmd_common::inventory::{Device, Interface, OperStatus};
use tmd_common::network::target::Target;
use tmd_core::inventory::InventoryBuilder;
use tmd_core::reachability::{AssumeReachable, HandshakeProbe, PingProbe, Reachability};
use tmd_core::sweep::{ProgressCallback, SweepCoordinator, SweepReport};
use tmd_core::vendors::MacOuiRepo;
use tmd_protocols::V2cClient;
use tracing::info;

use crate::commands::{Output, Probe};
use crate::terminal::print::Detail;
use crate::terminal::{colors, print, spinner};
use crate::tprint;

const HANDSHAKE_PORT: u16 = 22;

pub async fn inventory(
    target: Target,
    probe: Probe,
    config: SweepConfig,
    output: &Output,
) -> anyhow::Result<()> {
    let total = target.candidate_count();
    if total == 0 {
        anyhow::bail!("the target does not contain any usable address");
    }
    info!("{total} candidate hosts, probing with {probe:?}");

    let builder = InventoryBuilder::new(
        Arc::new(V2cClient::new()),
        reachability(probe, &config),
        &config,
    )
    .with_vendors(Arc::new(MacOuiRepo));
    let coordinator = SweepCoordinator::new(builder, config.workers);

    let on_progress: ProgressCallback = Arc::new(move |done| spinner::report_progress(done, total));
    let report = coordinator.sweep(target.candidates(), Some(on_progress)).await;
    spinner::get_spinner().finish_and_clear();

    if output.json {
        let json = serde_json::to_string_pretty(&report.devices)
            .context("could not serialize the inventory")?;
        println!("{json}");
        return Ok(());
    }

    inventory_ends(&report, output.quiet);
    Ok(())
}

fn reachability(probe: Probe, config: &SweepConfig) -> Arc<dyn Reachability> {
    match probe {
        Probe::Ping => Arc::new(PingProbe::new(config.timeout)),
        Probe::Tcp => Arc::new(HandshakeProbe::new(HANDSHAKE_PORT, config.timeout)),
        Probe::None => Arc::new(AssumeReachable),
    }
}

fn inventory_ends(report: &SweepReport, q_level: u8) {
    if report.devices.is_empty() {
        print::header("zero devices answered", q_level);
        if q_level == 0 {
            print::no_results();
        }
        return;
    }

    print::header("device inventory", q_level);
    if q_level < 2 {
        for (idx, device) in report.devices.iter().enumerate() {
            print_device_tree(device, idx);
            if idx + 1 != report.devices.len() {
                tprint!();
            }
        }
    }
    print_summary(report, q_level);
}

fn print_summary(report: &SweepReport, q_level: u8) {
    let devices: ColoredString = format!("{} devices", report.devices.len()).bold().green();
    let total_time: ColoredString = format_elapsed(report.elapsed).bold().yellow();
    let output: String = format!(
        "Inventory Complete: {devices} out of {} hosts in {total_time}",
        report.probed
    );

    match q_level {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            tprint!();
            print::print(&output);
        }
    }

    if !report.empty.is_empty() {
        info!(
            "{} reachable hosts exposed no system fields",
            report.empty.len()
        );
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

fn print_device_tree(device: &Device, idx: usize) {
    print::tree_head(idx, &device.ip.to_string());

    let details: Vec<Detail> = vec![
        field("Name", device.sys_name.as_deref()),
        field("Descr", device.sys_descr.as_deref()),
        field("Location", device.sys_location.as_deref()),
        field("Contact", device.sys_contact.as_deref()),
        ("Kind".to_string(), device.kind.to_string().color(colors::ACCENT)),
        match device.uptime {
            Some(uptime) => ("Uptime".to_string(), uptime.to_string().color(colors::ACCENT)),
            None => ("Uptime".to_string(), device.uptime_or_sentinel().color(colors::MISSING)),
        },
    ];

    let has_interfaces = !device.interfaces.is_empty();
    print::as_tree_one_level(&details, has_interfaces);

    if has_interfaces {
        let lines: Vec<String> = device.interfaces.iter().map(interface_line).collect();
        print::as_tree_two_level(&format!("Interfaces ({})", lines.len()), &lines);
    }
}

fn field(key: &str, value: Option<&str>) -> Detail {
    let value: ColoredString = match value {
        Some(text) if !text.is_empty() => text.color(colors::TEXT_DEFAULT),
        _ => tmd_common::snmp::value::NOT_AVAILABLE.color(colors::MISSING),
    };
    (key.to_string(), value)
}

fn interface_line(interface: &Interface) -> String {
    let status_color = match interface.status {
        OperStatus::Up => colors::STATUS_UP,
        OperStatus::Down => colors::STATUS_DOWN,
        _ => colors::STATUS_OTHER,
    };

    let mut line = format!(
        "{} {} {}",
        format!("[{}]", interface.index).color(colors::ACCENT),
        interface.name.as_deref().unwrap_or("unnamed").color(colors::PRIMARY),
        interface.status.to_string().color(status_color),
    );
    if let Some(mac) = &interface.mac {
        line.push_str(&format!(" {}", mac.color(colors::MAC_ADDR)));
    }
    if let Some(vendor) = &interface.vendor {
        line.push_str(&format!(" ({})", vendor.italic()));
    }
    line
}
