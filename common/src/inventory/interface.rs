use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Serialize, Serializer};

/// `ifOperStatus`, compared against the decoded integer exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OperStatus {
    Up,
    Down,
    Testing,
    #[default]
    Unknown,
}

impl OperStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => OperStatus::Up,
            2 => OperStatus::Down,
            3 => OperStatus::Testing,
            _ => OperStatus::Unknown,
        }
    }
}

impl fmt::Display for OperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperStatus::Up => "Up",
            OperStatus::Down => "Down",
            OperStatus::Testing => "Testing",
            OperStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub index: u32,
    pub name: Option<String>,
    pub mac: Option<String>,
    pub status: OperStatus,
    /// Manufacturer behind the MAC's OUI, when known.
    pub vendor: Option<String>,
}

impl Interface {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: None,
            mac: None,
            status: OperStatus::Unknown,
            vendor: None,
        }
    }

    /// A row is only worth reporting if it can be told apart by name or MAC.
    pub fn is_identified(&self) -> bool {
        self.name.is_some() || self.mac.is_some()
    }
}

/// Interfaces of one device keyed by their numeric `ifIndex`.
///
/// Iteration is ascending by index, so `2` comes before `10`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTable(BTreeMap<u32, Interface>);

impl InterfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the row for `index`, creating an empty one on first sight.
    pub fn row_mut(&mut self, index: u32) -> &mut Interface {
        self.0.entry(index).or_insert_with(|| Interface::new(index))
    }

    /// Drops every row that has neither a name nor a MAC.
    pub fn retain_identified(&mut self) {
        self.0.retain(|_, interface| interface.is_identified());
    }

    pub fn get(&self, index: u32) -> Option<&Interface> {
        self.0.get(&index)
    }

    pub fn iter(&self) -> btree_map::Values<'_, u32, Interface> {
        self.0.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, u32, Interface> {
        self.0.values_mut()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a InterfaceTable {
    type Item = &'a Interface;
    type IntoIter = btree_map::Values<'a, u32, Interface>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for InterfaceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
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
