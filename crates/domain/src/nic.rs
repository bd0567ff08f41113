use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a network adapter on a VM, as numbered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NicIndex(u32);

impl NicIndex {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for NicIndex {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(NicIndex)
            .map_err(|_| {
                DomainError::InvalidArgument(format!(
                    "invalid NIC index {} (expected 0..={})",
                    value,
                    u32::MAX
                ))
            })
    }
}

impl fmt::Display for NicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One network adapter as reported by the VM's network configuration.
///
/// `ip_address` is only present once guest tooling has reported it, and
/// `mac_address` may lag behind on freshly created adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNic {
    pub index: NicIndex,
    pub network: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default = "default_connected")]
    pub connected: bool,
}

fn default_connected() -> bool {
    true
}

impl VmNic {
    pub fn new(index: u32, network: impl Into<String>) -> Self {
        Self {
            index: NicIndex::new(index),
            network: network.into(),
            ip_address: None,
            mac_address: None,
            connected: default_connected(),
        }
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac_address = Some(mac.into());
        self
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// Reported IP, treating an empty string the same as no report.
    pub fn reported_ip(&self) -> Option<&str> {
        self.ip_address.as_deref().filter(|ip| !ip.is_empty())
    }

    pub fn reported_mac(&self) -> Option<&str> {
        self.mac_address.as_deref().filter(|mac| !mac.is_empty())
    }
}

/// IP/MAC pair extracted for one tracked NIC during a single observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicObservation {
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
}

impl From<&VmNic> for NicObservation {
    fn from(nic: &VmNic) -> Self {
        Self {
            ip_address: nic.reported_ip().map(str::to_string),
            mac_address: nic.reported_mac().map(str::to_string),
        }
    }
}
