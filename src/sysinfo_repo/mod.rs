// Host and interface metrics via sysinfo + sysfs

mod interfaces;
mod linux;

pub use interfaces::{Counter, CounterSource, collect_interfaces};
pub use linux::SysfsCounters;

use crate::error::CollectError;
use crate::models::*;
use std::net::IpAddr;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};
use tracing::instrument;

/// Stateless: every call builds its own sysinfo handles, so concurrent requests never share
/// a refresh.
pub struct SysinfoRepo {
    counters: SysfsCounters,
}

impl SysinfoRepo {
    pub fn new(sys_class_net: &str) -> Self {
        Self {
            counters: SysfsCounters::new(sys_class_net),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_host_metrics"))]
    pub async fn get_host_metrics(&self) -> Result<HostMetrics, CollectError> {
        let metrics = tokio::task::spawn_blocking(|| {
            let sys = System::new_with_specifics(
                RefreshKind::nothing()
                    .with_memory(MemoryRefreshKind::nothing().with_ram())
                    .with_cpu(CpuRefreshKind::nothing().with_frequency()),
            );
            let load = System::load_average();
            let fallback_model = linux::read_cpu_model_linux();
            let cpus = sys
                .cpus()
                .iter()
                .map(|c| CpuInfo {
                    model: Some(c.brand().trim())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .or_else(|| fallback_model.clone())
                        .unwrap_or_else(|| "Unknown".into()),
                    speed: c.frequency(),
                })
                .collect();

            HostMetrics {
                uptime: System::uptime(),
                loadavg: [load.one, load.five, load.fifteen],
                totalmem: sys.total_memory(),
                freemem: sys.available_memory(),
                cpus,
                hostname: System::host_name().unwrap_or_default(),
                utc: chrono::Utc::now().timestamp_millis(),
            }
        })
        .await?;
        Ok(metrics)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_interfaces"))]
    pub async fn get_interfaces(&self) -> Result<InterfaceMap, CollectError> {
        let counters = self.counters.clone();
        let map = tokio::task::spawn_blocking(move || {
            let networks = Networks::new_with_refreshed_list();
            let addresses = networks.list().iter().map(|(name, data)| {
                let addrs: Vec<IpAddr> = data.ip_networks().iter().map(|n| n.addr).collect();
                (name.clone(), addrs)
            });
            collect_interfaces(addresses, &counters)
        })
        .await?;
        Ok(map)
    }
}
