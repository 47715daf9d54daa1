use std::net::Ipv4Addr;

use anyhow::Context;
use colored::*;
use tmd_common::config::SweepConfig;
use tmd_common::snmp::{Identifier, NormalizedValue};
use tmd_core::normalize::normalize;
use tmd_protocols::{SnmpClient, V2cClient};
use tracing::warn;

use crate::commands::Output;
use crate::terminal::{colors, print};

pub async fn get(
    host: Ipv4Addr,
    oid: Identifier,
    config: &SweepConfig,
    output: &Output,
) -> anyhow::Result<()> {
    let opts = config.query_options();
    let raw = V2cClient::new().get(host, &oid, &opts).await;
    if let Err(e) = &raw {
        warn!("{host} did not answer {oid}: {e}");
    }
    let value = normalize(raw);

    if output.json {
        let json = serde_json::json!({
            "host": host,
            "oid": oid.to_string(),
            "value": value.is_available().then(|| value.to_string()),
        });
        let json = serde_json::to_string_pretty(&json).context("could not serialize the value")?;
        println!("{json}");
        return Ok(());
    }

    print::header("query result", output.quiet);
    print::aligned_line("Host", host.to_string());
    print::aligned_line("OID", oid.to_string());
    match &value {
        NormalizedValue::NotAvailable => {
            print::aligned_line("Value", value.to_string().color(colors::MISSING));
        }
        _ => print::aligned_line("Value", value.to_string()),
    }
    Ok(())
}
