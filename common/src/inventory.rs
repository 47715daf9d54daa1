pub mod device;
pub mod interface;

pub use device::{Device, DeviceKind, Rejection, SystemInfo};
pub use interface::{Interface, InterfaceTable, OperStatus};
