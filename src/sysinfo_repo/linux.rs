// Linux-specific helpers: /proc/cpuinfo and /sys/class/net counters.

use std::path::PathBuf;

use super::interfaces::{Counter, CounterSource};
use crate::error::CollectError;

/// Read first "model name" from /proc/cpuinfo (Linux). Used when sysinfo reports an empty brand.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty())?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Byte counters from `<root>/<iface>/statistics/{rx,tx}_bytes`.
#[derive(Debug, Clone)]
pub struct SysfsCounters {
    root: PathBuf,
}

impl SysfsCounters {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CounterSource for SysfsCounters {
    fn read_counter(&self, iface: &str, counter: Counter) -> Result<u64, CollectError> {
        let path = self
            .root
            .join(iface)
            .join("statistics")
            .join(format!("{}_bytes", counter.name()));
        let read_err = |reason: String| CollectError::InterfaceRead {
            iface: iface.to_string(),
            counter: counter.name(),
            reason,
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| read_err(format!("{}: {}", path.display(), e)))?;
        content
            .trim()
            .parse::<u64>()
            .map_err(|e| read_err(format!("{:?}: {}", content.trim(), e)))
    }
}
