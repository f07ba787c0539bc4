// Per-request snapshot pipeline.
// Stages run in a fixed order; each absorbs its own failure and leaves defaults behind.

use crate::config::AppConfig;
use crate::device_map::{BlkdevConf, DeviceMapRepo};
use crate::df_repo::DfRepo;
use crate::error::CollectError;
use crate::models::{Snapshot, seed_disk_free};
use crate::process_repo::ProcessRepo;
use crate::sysinfo_repo::SysinfoRepo;

pub struct SnapshotAssembler {
    sysinfo_repo: SysinfoRepo,
    device_map_repo: DeviceMapRepo,
    df_repo: DfRepo,
    process_repo: Option<ProcessRepo>,
}

impl SnapshotAssembler {
    pub fn new(
        sysinfo_repo: SysinfoRepo,
        device_map_repo: DeviceMapRepo,
        df_repo: DfRepo,
        process_repo: Option<ProcessRepo>,
    ) -> Self {
        Self {
            sysinfo_repo,
            device_map_repo,
            df_repo,
            process_repo,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = config.commands.timeout();
        Self::new(
            SysinfoRepo::new(&config.sources.sys_class_net),
            DeviceMapRepo::new(&config.sources.blkdev_conf, &config.sources.nbd_client),
            DfRepo::new(&config.commands.df, timeout),
            config
                .commands
                .worker_process()
                .map(|name| ProcessRepo::new(&config.commands.ps, name, timeout)),
        )
    }

    /// Runs one full collection. Never fails: a failed stage contributes its defaults.
    pub async fn collect(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        match self.sysinfo_repo.get_host_metrics().await {
            Ok(host) => snapshot.host = host,
            Err(e) => {
                absorb("host metrics", &e);
                snapshot.host.utc = chrono::Utc::now().timestamp_millis();
            }
        }

        match self.sysinfo_repo.get_interfaces().await {
            Ok(ifaces) => snapshot.ifaces = ifaces,
            Err(e) => absorb("interfaces", &e),
        }

        let conf = self.device_map_repo.load_config().await.unwrap_or_else(|e| {
            absorb("device config", &e);
            BlkdevConf::default()
        });

        let (devices, nbd_err) = self.device_map_repo.correlate_nbd(conf).await;
        if let Some(e) = nbd_err {
            absorb("nbd correlation", &e);
        }
        snapshot.dfree = seed_disk_free(&devices);
        snapshot.devices = devices;

        // Disk usage needs the final path set; the process count is independent of it.
        let (df_result, processes) = tokio::join!(
            self.df_repo.fill_disk_free(&mut snapshot.dfree),
            self.count_processes()
        );
        if let Err(e) = df_result {
            absorb("disk usage", &e);
        }
        snapshot.processes = processes;

        snapshot
    }

    async fn count_processes(&self) -> Option<u32> {
        let repo = self.process_repo.as_ref()?;
        match repo.get_process_count().await {
            Ok(n) => Some(n),
            Err(e) => {
                absorb("process count", &e);
                Some(0)
            }
        }
    }
}

fn absorb(stage: &'static str, e: &CollectError) {
    if e.is_routine() {
        tracing::debug!(stage, error = %e, "stage skipped");
    } else {
        tracing::warn!(stage, error = %e, "stage failed, using defaults");
    }
}
