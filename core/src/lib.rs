//! # Inventory Core
//!
//! The query → normalize → assemble pipeline, built on the
//! [`SnmpClient`](tmd_protocols::SnmpClient) port:
//!
//! * **[`normalize`]**: Raw wire values to display values.
//! * **[`assemble`]**: `ifEntry` rows to an interface table.
//! * **[`inventory`]**: One host to zero or one device.
//! * **[`sweep`]**: Many hosts, bounded concurrency.
//!
//! Liveness ([`reachability`]), MAC vendors ([`vendors`]) and local
//! interface counters ([`traffic`]) are ports with swappable adapters.
//! Nothing in this crate prints.

pub mod assemble;
pub mod inventory;
pub mod normalize;
pub mod reachability;
pub mod sweep;
pub mod traffic;
pub mod vendors;
