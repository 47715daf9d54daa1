//! Identifiers from the `system` group and the interfaces table that the
//! inventory depends on.

use super::oid::Identifier;

pub const SYS_DESCR: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 1, 0];
pub const SYS_UPTIME: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 3, 0];
pub const SYS_CONTACT: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 4, 0];
pub const SYS_NAME: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 5, 0];
pub const SYS_LOCATION: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 6, 0];

/// `ifEntry`. Rows below it are `<column>.<ifIndex>`.
pub const IF_ENTRY: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1];

pub const IF_DESCR_COLUMN: u32 = 2;
pub const IF_PHYS_ADDRESS_COLUMN: u32 = 6;
pub const IF_OPER_STATUS_COLUMN: u32 = 8;

/// The five scalar fields queried on every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemField {
    Description,
    Uptime,
    Contact,
    Name,
    Location,
}

impl SystemField {
    pub fn identifier(&self) -> Identifier {
        let components = match self {
            SystemField::Description => SYS_DESCR,
            SystemField::Uptime => SYS_UPTIME,
            SystemField::Contact => SYS_CONTACT,
            SystemField::Name => SYS_NAME,
            SystemField::Location => SYS_LOCATION,
        };
        Identifier::from_slice(components)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SystemField::Description => "sysDescr",
            SystemField::Uptime => "sysUpTime",
            SystemField::Contact => "sysContact",
            SystemField::Name => "sysName",
            SystemField::Location => "sysLocation",
        }
    }
}

pub fn if_entry() -> Identifier {
    Identifier::from_slice(IF_ENTRY)
}
