// Device -> path mapping from the block-device config and the nbd-client dump

mod blkdev_conf;
mod nbd_client;

pub use blkdev_conf::{BlkdevConf, parse_blkdev_conf};
pub use nbd_client::{NbdEntry, merge_nbd_entries, parse_nbd_client};

use crate::error::CollectError;
use crate::models::DeviceMap;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub struct DeviceMapRepo {
    blkdev_conf: PathBuf,
    nbd_client: PathBuf,
}

impl DeviceMapRepo {
    pub fn new(blkdev_conf: impl Into<PathBuf>, nbd_client: impl Into<PathBuf>) -> Self {
        Self {
            blkdev_conf: blkdev_conf.into(),
            nbd_client: nbd_client.into(),
        }
    }

    /// Reads and parses the block-device config.
    #[instrument(skip(self), fields(repo = "device_map", operation = "load_config"))]
    pub async fn load_config(&self) -> Result<BlkdevConf, CollectError> {
        let text = read_source(&self.blkdev_conf).await?;
        Ok(parse_blkdev_conf(&text))
    }

    /// Reads the nbd-client dump and folds matching entries into the config's devices.
    /// Returns the config's devices unchanged when the dump cannot be read.
    #[instrument(skip_all, fields(repo = "device_map", operation = "correlate_nbd"))]
    pub async fn correlate_nbd(&self, conf: BlkdevConf) -> (DeviceMap, Option<CollectError>) {
        match read_source(&self.nbd_client).await {
            Ok(text) => (merge_nbd_entries(conf, &parse_nbd_client(&text)), None),
            Err(e) => (conf.devices, Some(e)),
        }
    }
}

// Hand-edited configs may carry Latin-1 comments; invalid bytes become U+FFFD instead of
// discarding the whole file.
async fn read_source(path: &Path) -> Result<String, CollectError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CollectError::ConfigUnavailable {
            path: path.display().to_string(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
