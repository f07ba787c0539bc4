// Device / disk usage models

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Device name -> paths. Index 0 is the cache directory, later entries are NBD devices.
pub type DeviceMap = BTreeMap<String, Vec<String>>;

/// Path -> usage. Keys are exactly the paths listed in a [`DeviceMap`].
pub type DiskFreeMap = BTreeMap<String, DiskFree>;

/// Byte counts reported by `df` for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub size: u64,
    pub used: u64,
    pub avail: u64,
}

/// Usage of one path; `Unresolved` goes over the wire as the number `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiskFree {
    #[default]
    Unresolved,
    Usage(DiskUsage),
}

impl DiskFree {
    pub fn usage(&self) -> Option<&DiskUsage> {
        match self {
            DiskFree::Unresolved => None,
            DiskFree::Usage(u) => Some(u),
        }
    }
}

impl Serialize for DiskFree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiskFree::Unresolved => serializer.serialize_u64(0),
            DiskFree::Usage(u) => u.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DiskFree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Usage(DiskUsage),
            Zero(u64),
        }
        match Wire::deserialize(deserializer)? {
            Wire::Usage(u) => Ok(DiskFree::Usage(u)),
            Wire::Zero(0) => Ok(DiskFree::Unresolved),
            Wire::Zero(n) => Err(serde::de::Error::custom(format!(
                "expected usage object or 0, got {}",
                n
            ))),
        }
    }
}

/// Seeds one unresolved entry per path listed anywhere in `devices`.
pub fn seed_disk_free(devices: &DeviceMap) -> DiskFreeMap {
    devices
        .values()
        .flatten()
        .map(|path| (path.clone(), DiskFree::Unresolved))
        .collect()
}
