//! # Protocol Client
//!
//! Read-only SNMP queries against one host at a time:
//!
//! * **[`client`]**: The [`SnmpClient`] port the rest of the workspace depends on.
//! * **[`walk`]**: A lazy, bounded get-next cursor over a subtree.
//! * **[`v2c`]**: The community-based adapter built on `snmp2`.
//! * **[`decode`]**: Wire value to [`RawValue`](tmd_common::snmp::RawValue) conversion.

pub mod client;
pub mod decode;
pub mod v2c;
pub mod walk;

pub use client::SnmpClient;
pub use v2c::V2cClient;
pub use walk::{Walk, WalkEnd};
