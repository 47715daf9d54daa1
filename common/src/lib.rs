//! # Shared Models
//!
//! Types used across every layer of `tmd`:
//!
//! * **[`snmp`]**: Identifiers, raw wire values and their normalized forms.
//! * **[`inventory`]**: The `Device` and `Interface` records a sweep produces.
//! * **[`network`]**: Candidate target parsing, MAC helpers and local traffic counters.
//! * **[`config`]**: Sweep and per-query configuration.

pub mod config;
pub mod inventory;
pub mod network;
pub mod snmp;
