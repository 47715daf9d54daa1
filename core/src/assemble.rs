//! # Interface Table Assembler
//!
//! Groups the flat rows of an `ifEntry` walk into one [`Interface`] per
//! `ifIndex`. Rows arrive column by column (every description, then every
//! address, ...), so a record is only complete once the whole walk is consumed.

use tmd_common::inventory::{InterfaceTable, OperStatus};
use tmd_common::snmp::mib::{self, IF_DESCR_COLUMN, IF_OPER_STATUS_COLUMN, IF_PHYS_ADDRESS_COLUMN};
use tmd_common::snmp::{Identifier, RawValue};
use tracing::trace;

use crate::normalize::{clean_text, normalize, normalize_mac};

pub struct InterfaceAssembler {
    prefix: Identifier,
    table: InterfaceTable,
}

impl Default for InterfaceAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceAssembler {
    pub fn new() -> Self {
        Self {
            prefix: mib::if_entry(),
            table: InterfaceTable::new(),
        }
    }

    /// Routes one walk row to the interface it belongs to.
    ///
    /// Rows outside `ifEntry`, with a zero index, or from columns other than
    /// description, physical address and operational status are ignored.
    pub fn push(&mut self, oid: &Identifier, value: RawValue) {
        let Some(&[column, index]) = oid.suffix_after(&self.prefix) else {
            trace!(%oid, "not an ifEntry cell");
            return;
        };

        if index == 0 {
            trace!(%oid, "row without an interface index");
            return;
        }

        match column {
            IF_DESCR_COLUMN => {
                self.table.row_mut(index).name = normalize(Ok(value)).into_text();
            }
            IF_PHYS_ADDRESS_COLUMN => {
                self.table.row_mut(index).mac = normalize_mac(Ok(value)).into_text();
            }
            IF_OPER_STATUS_COLUMN => {
                self.table.row_mut(index).status = oper_status(&value);
            }
            _ => {}
        }
    }

    /// Drops interfaces with neither name nor MAC and hands back the table.
    pub fn finish(mut self) -> InterfaceTable {
        self.table.retain_identified();
        self.table
    }
}

/// Feeds a whole row sequence through a fresh [`InterfaceAssembler`].
pub fn assemble_interfaces<I>(rows: I) -> InterfaceTable
where
    I: IntoIterator<Item = (Identifier, RawValue)>,
{
    let mut assembler = InterfaceAssembler::new();
    for (oid, value) in rows {
        assembler.push(&oid, value);
    }
    assembler.finish()
}

/// Exact match on the decoded code; "up(1)" or "11" are not `Up`.
fn oper_status(value: &RawValue) -> OperStatus {
    match value {
        RawValue::Integer(code) => OperStatus::from_code(*code),
        RawValue::PlainString(text) => clean_text(text)
            .parse::<i64>()
            .map(OperStatus::from_code)
            .unwrap_or(OperStatus::Unknown),
        _ => OperStatus::Unknown,
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
