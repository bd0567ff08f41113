use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseBindingState {
    Active,
    Free,
    Abandoned,
    Expired,
    Released,
    Backup,
    #[serde(other)]
    Unknown,
}

impl LeaseBindingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseBindingState::Active => "active",
            LeaseBindingState::Free => "free",
            LeaseBindingState::Abandoned => "abandoned",
            LeaseBindingState::Expired => "expired",
            LeaseBindingState::Released => "released",
            LeaseBindingState::Backup => "backup",
            LeaseBindingState::Unknown => "unknown",
        }
    }
}

/// A lease record held by a gateway's built-in DHCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpLease {
    pub mac_address: String,
    pub ip_address: String,
    pub binding_state: LeaseBindingState,
}

impl DhcpLease {
    pub fn new(
        mac_address: impl Into<String>,
        ip_address: impl Into<String>,
        binding_state: LeaseBindingState,
    ) -> Self {
        Self {
            mac_address: mac_address.into(),
            ip_address: ip_address.into(),
            binding_state,
        }
    }

    pub fn active(mac_address: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self::new(mac_address, ip_address, LeaseBindingState::Active)
    }

    pub fn is_active(&self) -> bool {
        self.binding_state == LeaseBindingState::Active
    }

    /// Active lease bound to exactly this MAC with a usable address.
    pub fn is_active_for(&self, mac: &str) -> bool {
        self.is_active() && self.mac_address == mac && !self.ip_address.is_empty()
    }
}
