use serde::Deserialize;
use std::time::Duration;

/// `RUST_LOG` fallback; keeps the HTTP trace layer's request spans visible.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sources: SourcesConfig,
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 80,
            host: "0.0.0.0".into(),
        }
    }
}

/// Files read (never written) on every /data request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Block-device daemon config: `[device]` blocks with `cachedir`, plus a global `listen`.
    pub blkdev_conf: String,
    /// nbd-client state dump with `NBD_DEVICE[n]=`, `NBD_NAME[n]=`, `NBD_HOST[n]=` lines.
    pub nbd_client: String,
    /// Root of the per-interface statistics tree.
    pub sys_class_net: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            blkdev_conf: "/usr/local/etc/s3blkdev.conf".into(),
            nbd_client: "/etc/nbd-client".into(),
            sys_class_net: "/sys/class/net".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub df: String,
    pub ps: String,
    /// Process name counted into `processes`; empty disables the count and omits the field.
    pub worker_process: String,
    /// Upper bound for each external command; a timeout is treated like a failed command.
    pub timeout_ms: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            df: "df".into(),
            ps: "ps".into(),
            worker_process: "s3blkdev-sync".into(),
            timeout_ms: 5000,
        }
    }
}

impl CommandsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn worker_process(&self) -> Option<&str> {
        Some(self.worker_process.as_str()).filter(|s| !s.is_empty())
    }
}

impl AppConfig {
    /// Loads from `CONFIG_FILE`, else `config.toml`; built-in defaults when neither exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var("CONFIG_FILE") {
            Ok(p) => p,
            Err(_) => {
                let default = "config.toml";
                if !std::path::Path::new(default).exists() {
                    tracing::info!("no {} found, using built-in defaults", default);
                    return Ok(Self::default());
                }
                default.into()
            }
        };
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("config file {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.blkdev_conf.is_empty(),
            "sources.blkdev_conf must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.nbd_client.is_empty(),
            "sources.nbd_client must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.sys_class_net.is_empty(),
            "sources.sys_class_net must be non-empty"
        );
        anyhow::ensure!(!self.commands.df.is_empty(), "commands.df must be non-empty");
        anyhow::ensure!(!self.commands.ps.is_empty(), "commands.ps must be non-empty");
        anyhow::ensure!(
            self.commands.timeout_ms > 0,
            "commands.timeout_ms must be > 0, got {}",
            self.commands.timeout_ms
        );
        Ok(())
    }
}
