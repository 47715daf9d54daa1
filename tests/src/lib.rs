//! Cross-crate tests: the full sweep pipeline driven against in-memory agents.

pub mod mock;

mod inventory;
