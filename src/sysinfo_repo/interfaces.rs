// Interface snapshot: address filtering plus counter reads.

use std::net::IpAddr;

use crate::error::CollectError;
use crate::models::{InterfaceMap, InterfaceStat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Rx,
    Tx,
}

impl Counter {
    pub fn name(self) -> &'static str {
        match self {
            Counter::Rx => "rx",
            Counter::Tx => "tx",
        }
    }
}

/// Source of cumulative per-interface byte counters. Each read may fail independently.
pub trait CounterSource {
    fn read_counter(&self, iface: &str, counter: Counter) -> Result<u64, CollectError>;
}

/// Builds the interface map from `(name, addresses)` pairs.
///
/// Interfaces without a non-loopback address are skipped. An interface whose rx or tx
/// counter cannot be read is omitted as a whole, never emitted with zeros.
pub fn collect_interfaces<I, C>(addresses: I, counters: &C) -> InterfaceMap
where
    I: IntoIterator<Item = (String, Vec<IpAddr>)>,
    C: CounterSource + ?Sized,
{
    let mut out = InterfaceMap::new();
    for (name, addrs) in addresses {
        let mut stat = InterfaceStat::default();
        for addr in addrs.iter().filter(|a| !a.is_loopback()) {
            match addr {
                IpAddr::V4(v4) => stat.ipv4.push(v4.to_string()),
                IpAddr::V6(v6) => stat.ipv6.push(v6.to_string()),
            }
        }
        if stat.ipv4.is_empty() && stat.ipv6.is_empty() {
            continue;
        }

        let read = counters
            .read_counter(&name, Counter::Rx)
            .and_then(|rx| Ok((rx, counters.read_counter(&name, Counter::Tx)?)));
        match read {
            Ok((rx, tx)) => {
                stat.rx = rx;
                stat.tx = tx;
                out.insert(name, stat);
            }
            Err(e) => tracing::debug!(error = %e, "skipping interface"),
        }
    }
    out
}
