// Host metrics and the /data snapshot

use serde::{Deserialize, Serialize};

use super::{DeviceMap, DiskFreeMap, InterfaceMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub model: String,
    /// MHz
    pub speed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostMetrics {
    pub uptime: u64,
    pub loadavg: [f64; 3],
    pub totalmem: u64,
    pub freemem: u64,
    pub cpus: Vec<CpuInfo>,
    pub hostname: String,
    /// Wall clock, milliseconds since the Unix epoch.
    pub utc: i64,
}

/// One /data document. Built from scratch per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub host: HostMetrics,
    pub devices: DeviceMap,
    pub dfree: DiskFreeMap,
    pub ifaces: InterfaceMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes: Option<u32>,
}
