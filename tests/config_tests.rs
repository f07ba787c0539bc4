// Config loading and validation tests

use blkdev_status::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[sources]
blkdev_conf = "/etc/blkdev.conf"
nbd_client = "/etc/nbd-client"
sys_class_net = "/sys/class/net"

[commands]
df = "/bin/df"
ps = "/bin/ps"
worker_process = "s3blkdev-sync"
timeout_ms = 3000
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.sources.blkdev_conf, "/etc/blkdev.conf");
    assert_eq!(config.commands.df, "/bin/df");
    assert_eq!(config.commands.timeout().as_millis(), 3000);
    assert_eq!(config.commands.worker_process(), Some("s3blkdev-sync"));
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config uses defaults");
    assert_eq!(config.server.port, 80);
    assert_eq!(config.sources.blkdev_conf, "/usr/local/etc/s3blkdev.conf");
    assert_eq!(config.sources.nbd_client, "/etc/nbd-client");
    assert_eq!(config.sources.sys_class_net, "/sys/class/net");
    assert_eq!(config.commands.df, "df");
    assert_eq!(config.commands.timeout_ms, 5000);
}

#[test]
fn test_config_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[server]\nport = 9000\n").expect("valid");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.commands.ps, "ps");
}

#[test]
fn test_config_empty_worker_process_disables_count() {
    let cfg = VALID_CONFIG.replace("worker_process = \"s3blkdev-sync\"", "worker_process = \"\"");
    let config = AppConfig::load_from_str(&cfg).expect("valid");
    assert_eq!(config.commands.worker_process(), None);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_blkdev_conf() {
    let bad = VALID_CONFIG.replace("blkdev_conf = \"/etc/blkdev.conf\"", "blkdev_conf = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sources.blkdev_conf"));
}

#[test]
fn test_config_validation_rejects_empty_df() {
    let bad = VALID_CONFIG.replace("df = \"/bin/df\"", "df = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("commands.df"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_ms = 3000", "timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.sources.nbd_client, "/etc/nbd-client");
}

#[test]
fn default_log_filter_keeps_request_traces() {
    let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).expect("filter parses");
    let rendered = filter.to_string();
    assert!(rendered.contains("tower_http=debug"));
    assert!(rendered.split(',').any(|d| d == "info"));
}
