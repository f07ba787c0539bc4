// Shared test helpers: temp source files, fake sysfs tree, stub df/ps scripts

#![allow(dead_code)]

use blkdev_status::config::AppConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ALPHA_CONF: &str = "[alpha]\ncachedir /var/cache/alpha\nlisten 1.2.3.4\n";
pub const ALPHA_NBD: &str =
    "NBD_DEVICE[0]=\"/dev/nbd0\"\nNBD_NAME[0]=\"alpha\"\nNBD_HOST[0]=\"1.2.3.4\"\n";

/// Prints a df-style header, then `<path> ext4 1000 400 600` for every argument after `--`.
pub const FAKE_DF: &str = r#"#!/bin/sh
echo "File Type 1B-blocks Used Avail"
paths=0
for a in "$@"; do
  if [ "$paths" = 1 ]; then echo "$a ext4 1000 400 600"; fi
  if [ "$a" = "--" ]; then paths=1; fi
done
"#;

pub const FAKE_PS: &str = "#!/bin/sh\nprintf 'systemd\\ns3blkdev-sync\\nsshd\\ns3blkdev-sync\\n'\n";

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[cfg(unix)]
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.write(name, content);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// `<root>/<iface>/statistics/{rx,tx}_bytes`; `None` leaves that counter file out.
    pub fn write_iface(&self, iface: &str, rx: Option<&str>, tx: Option<&str>) -> PathBuf {
        let root = self.path("net");
        let stats = root.join(iface).join("statistics");
        std::fs::create_dir_all(&stats).unwrap();
        if let Some(rx) = rx {
            std::fs::write(stats.join("rx_bytes"), rx).unwrap();
        }
        if let Some(tx) = tx {
            std::fs::write(stats.join("tx_bytes"), tx).unwrap();
        }
        root
    }

    /// Config pointing every source and command into this fixture; nothing exists until written.
    pub fn config(&self) -> AppConfig {
        let toml = format!(
            r#"
[server]
port = 8080
host = "127.0.0.1"

[sources]
blkdev_conf = "{conf}"
nbd_client = "{nbd}"
sys_class_net = "{net}"

[commands]
df = "{df}"
ps = "{ps}"
worker_process = "s3blkdev-sync"
timeout_ms = 2000
"#,
            conf = s(&self.path("s3blkdev.conf")),
            nbd = s(&self.path("nbd-client")),
            net = s(&self.path("net")),
            df = s(&self.path("bin/df")),
            ps = s(&self.path("bin/ps")),
        );
        AppConfig::load_from_str(&toml).unwrap()
    }
}

fn s(p: &Path) -> String {
    p.to_str().unwrap().to_string()
}
