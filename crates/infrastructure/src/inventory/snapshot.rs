use nicprobe_domain::{DhcpLease, GatewayRef, VmNic};
use serde::Deserialize;
use std::collections::HashMap;

/// On-disk inventory format consumed by [`super::JsonInventory`].
#[derive(Debug, Default, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub vms: HashMap<String, VmEntry>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkEntry>,
    #[serde(default)]
    pub gateways: HashMap<String, GatewayEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VmEntry {
    #[serde(default)]
    pub nics: Vec<VmNic>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NetworkEntry {
    #[serde(default)]
    pub gateway: Option<GatewayRef>,
}

/// `leases: None` means the gateway has no DHCP lease table at all.
#[derive(Debug, Default, Deserialize)]
pub struct GatewayEntry {
    #[serde(default)]
    pub leases: Option<Vec<DhcpLease>>,
}
