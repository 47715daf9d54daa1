use anyhow::Context;
use colored::*;
use tmd_common::network::traffic::{InterfaceTraffic, TrafficReport};
use tmd_core::traffic::{SysinfoTraffic, local_traffic};

use crate::commands::Output;
use crate::terminal::print::Detail;
use crate::terminal::{colors, print};
use crate::tprint;

pub fn traffic(output: &Output) -> anyhow::Result<()> {
    let report = local_traffic(&SysinfoTraffic);

    if output.json {
        let json = serde_json::to_string_pretty(&report)
            .context("could not serialize the traffic counters")?;
        println!("{json}");
        return Ok(());
    }

    print_report(&report, output.quiet);
    Ok(())
}

fn print_report(report: &TrafficReport, q_level: u8) {
    print::header("local traffic", q_level);
    if report.interfaces.is_empty() {
        if q_level == 0 {
            print::no_results();
        }
        return;
    }

    if q_level < 2 {
        for (idx, interface) in report.interfaces.iter().enumerate() {
            print::tree_head(idx, &interface.interface);
            print::as_tree_one_level(&details(interface), false);
            tprint!();
        }
    }

    let total = &report.total;
    let sent = volume(total.bytes_sent, total.packets_sent);
    let received = volume(total.bytes_received, total.packets_received);
    print::aligned_line("Sent", sent);
    print::aligned_line("Received", received);
}

fn details(interface: &InterfaceTraffic) -> Vec<Detail> {
    let sent = volume(interface.bytes_sent, interface.packets_sent);
    let received = volume(interface.bytes_received, interface.packets_received);
    vec![
        ("Sent".to_string(), sent),
        ("Received".to_string(), received),
    ]
}

fn volume(bytes: u64, packets: u64) -> ColoredString {
    format!("{bytes} bytes / {packets} packets").color(colors::TEXT_DEFAULT)
}
