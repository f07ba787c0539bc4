// Block-device daemon config: `[device]` headers, per-device `cachedir`, global `listen`.

use crate::models::DeviceMap;

/// Result of one config parse. `listen` only feeds NBD correlation and never reaches the
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlkdevConf {
    pub devices: DeviceMap,
    pub listen: Option<String>,
}

/// Parses the config text. Unknown or malformed lines are ignored.
///
/// A `cachedir` line binds to the most recent header and then clears it, so a second
/// `cachedir` under the same header is ignored. `listen` is global; the last one wins.
pub fn parse_blkdev_conf(text: &str) -> BlkdevConf {
    let mut conf = BlkdevConf::default();
    let mut current: Option<&str> = None;

    for line in text.lines().map(str::trim_start) {
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = header(line) {
            current = Some(name);
        } else if let (Some(device), Some(path)) = (current, directive(line, "cachedir")) {
            conf.devices.insert(device.to_string(), vec![path.to_string()]);
            current = None;
        } else if let Some(value) = directive(line, "listen") {
            if let Some(addr) = value.split_whitespace().next() {
                conf.listen = Some(addr.to_string());
            }
        }
    }
    conf
}

/// `[name` up to the closing bracket (or end of line); the name must be non-empty.
fn header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let name = rest.split(']').next().unwrap_or_default();
    Some(name).filter(|n| !n.is_empty())
}

/// `key <value>`: the key must be followed by whitespace and a non-empty value.
fn directive<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim()).filter(|v| !v.is_empty())
}
