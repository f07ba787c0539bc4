// nbd-client state dump: indexed `NBD_DEVICE[n]=`, `NBD_NAME[n]=`, `NBD_HOST[n]=` lines.

use std::collections::BTreeMap;

use super::blkdev_conf::BlkdevConf;
use crate::models::DeviceMap;

/// Attributes collected for one index; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NbdEntry {
    /// Local block device, e.g. `/dev/nbd0`.
    pub device: Option<String>,
    /// Export name; matched against config device names.
    pub name: Option<String>,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Device,
    Name,
    Host,
}

const KEYS: [(&str, Key); 3] = [
    ("NBD_DEVICE", Key::Device),
    ("NBD_NAME", Key::Name),
    ("NBD_HOST", Key::Host),
];

/// Accumulates entries by index. Lines may arrive in any order and interleave indices.
pub fn parse_nbd_client(text: &str) -> BTreeMap<u64, NbdEntry> {
    let mut entries: BTreeMap<u64, NbdEntry> = BTreeMap::new();
    for line in text.lines() {
        let Some((key, index, value)) = parse_assignment(line.trim_start()) else {
            continue;
        };
        let entry = entries.entry(index).or_default();
        let slot = match key {
            Key::Device => &mut entry.device,
            Key::Name => &mut entry.name,
            Key::Host => &mut entry.host,
        };
        *slot = Some(value.to_string());
    }
    entries
}

/// Appends each complete entry's device path to its configured device, if the entry's host
/// is the configured listen address. Consumes the config so `listen` goes no further.
///
/// Entries are applied in ascending index order. Incomplete triples, unknown names and
/// foreign hosts are dropped; no new device names are ever introduced.
pub fn merge_nbd_entries(conf: BlkdevConf, entries: &BTreeMap<u64, NbdEntry>) -> DeviceMap {
    let BlkdevConf {
        mut devices,
        listen,
    } = conf;
    let Some(listen) = listen else {
        return devices;
    };

    for entry in entries.values() {
        let (Some(path), Some(name), Some(host)) = (&entry.device, &entry.name, &entry.host)
        else {
            continue;
        };
        if *host != listen {
            continue;
        }
        if let Some(paths) = devices.get_mut(name) {
            paths.push(path.clone());
        }
    }
    devices
}

/// `KEY[digits] = "value` with optional spaces around `=` and an optional opening quote.
/// The value ends at the next quote, or at end of line (trailing whitespace trimmed).
fn parse_assignment(line: &str) -> Option<(Key, u64, &str)> {
    let (rest, key) = KEYS
        .iter()
        .find_map(|(prefix, key)| line.strip_prefix(prefix).map(|r| (r, *key)))?;
    let rest = rest.strip_prefix('[')?;
    let close = rest.find(']')?;
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse::<u64>().ok()?;

    let rest = rest[close + 1..].trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let value = match rest.find('"') {
        Some(end) => &rest[..end],
        None => rest.trim_end(),
    };
    if value.is_empty() {
        return None;
    }
    Some((key, index, value))
}
