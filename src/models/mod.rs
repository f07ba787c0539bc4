// Wire models for the /data document

mod network;
mod storage;
mod system;

pub use network::{InterfaceMap, InterfaceStat};
pub use storage::{DeviceMap, DiskFree, DiskFreeMap, DiskUsage, seed_disk_free};
pub use system::{CpuInfo, HostMetrics, Snapshot};
