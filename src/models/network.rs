// Network interface models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addresses and cumulative byte counters of one interface. Counters are raw values since
/// boot; rates are left to the dashboard, which diffs successive polls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStat {
    #[serde(rename = "IPv4")]
    pub ipv4: Vec<String>,
    #[serde(rename = "IPv6")]
    pub ipv6: Vec<String>,
    pub rx: u64,
    pub tx: u64,
}

/// Interface name -> stats. Only interfaces with a non-loopback address are present.
pub type InterfaceMap = BTreeMap<String, InterfaceStat>;
