use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

use super::interface::InterfaceTable;
use crate::snmp::value::{NOT_AVAILABLE, NormalizedValue, Uptime};

/// Why a candidate host produced no [`Device`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("host did not answer the reachability probe")]
    Unreachable,
    #[error("host is reachable but exposes no system fields")]
    EmptyInventory,
}

/// The five normalized scalar values of one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub descr: NormalizedValue,
    pub name: NormalizedValue,
    pub location: NormalizedValue,
    pub uptime: NormalizedValue,
    pub contact: NormalizedValue,
}

impl SystemInfo {
    pub fn not_available() -> Self {
        Self {
            descr: NormalizedValue::NotAvailable,
            name: NormalizedValue::NotAvailable,
            location: NormalizedValue::NotAvailable,
            uptime: NormalizedValue::NotAvailable,
            contact: NormalizedValue::NotAvailable,
        }
    }

    /// Fields that would end up in a device record.
    pub fn resolved_count(&self) -> usize {
        let uptime = matches!(self.uptime, NormalizedValue::Uptime(_));
        [&self.descr, &self.name, &self.location, &self.contact]
            .into_iter()
            .filter(|value| value.has_content())
            .count()
            + usize::from(uptime)
    }
}

/// Coarse device class read from `sysDescr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Pc,
    Other,
}

impl DeviceKind {
    /// Hosts whose description mentions Linux are PCs; everything else,
    /// including a missing description, is `Other`.
    pub fn classify(sys_descr: Option<&str>) -> Self {
        match sys_descr {
            Some(descr) if descr.contains("Linux") => DeviceKind::Pc,
            _ => DeviceKind::Other,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Pc => f.write_str("PC"),
            DeviceKind::Other => f.write_str("Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub sys_name: Option<String>,
    pub sys_descr: Option<String>,
    pub sys_location: Option<String>,
    pub sys_contact: Option<String>,
    pub uptime: Option<Uptime>,
    pub kind: DeviceKind,
    pub interfaces: InterfaceTable,
}

impl Device {
    /// Builds a device from its scalar fields.
    ///
    /// A host where none of the five fields resolved is rejected rather than
    /// turned into an empty record.
    pub fn from_system(ip: Ipv4Addr, info: SystemInfo) -> Result<Self, Rejection> {
        let sys_descr = info.descr.into_text();
        let device = Self {
            ip,
            kind: DeviceKind::classify(sys_descr.as_deref()),
            sys_name: info.name.into_text(),
            sys_descr,
            sys_location: info.location.into_text(),
            sys_contact: info.contact.into_text(),
            uptime: info.uptime.into_uptime(),
            interfaces: InterfaceTable::new(),
        };

        if !device.has_system_fields() {
            return Err(Rejection::EmptyInventory);
        }
        Ok(device)
    }

    pub fn has_system_fields(&self) -> bool {
        self.sys_name.is_some()
            || self.sys_descr.is_some()
            || self.sys_location.is_some()
            || self.sys_contact.is_some()
            || self.uptime.is_some()
    }

    pub fn with_interfaces(mut self, interfaces: InterfaceTable) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn name_or_sentinel(&self) -> &str {
        or_sentinel(&self.sys_name)
    }

    pub fn descr_or_sentinel(&self) -> &str {
        or_sentinel(&self.sys_descr)
    }

    pub fn location_or_sentinel(&self) -> &str {
        or_sentinel(&self.sys_location)
    }

    pub fn contact_or_sentinel(&self) -> &str {
        or_sentinel(&self.sys_contact)
    }

    pub fn uptime_or_sentinel(&self) -> String {
        self.uptime
            .map(|uptime| uptime.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn or_sentinel(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
