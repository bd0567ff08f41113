use async_trait::async_trait;
use nicprobe_application::ports::{DhcpLeaseSource, NetworkConfigReader, RoutedNetworkTopology};
use nicprobe_domain::{DhcpLease, DomainError, GatewayRef, VmNic};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::snapshot::InventorySnapshot;

/// Serves VM NICs, network topology and gateway leases from a JSON snapshot.
///
/// The file is re-read on every call so that changes made while a
/// resolution is polling are picked up on the next tick.
pub struct JsonInventory {
    path: PathBuf,
}

impl JsonInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<InventorySnapshot, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to read inventory {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DomainError::InvalidResponse(format!(
                "Malformed inventory {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn normalize(mut nic: VmNic) -> VmNic {
    if nic.reported_ip().is_none() {
        nic.ip_address = None;
    }
    if nic.reported_mac().is_none() {
        nic.mac_address = None;
    }
    nic
}

#[async_trait]
impl NetworkConfigReader for JsonInventory {
    async fn read_nics(&self, vm_id: &str) -> Result<Vec<VmNic>, DomainError> {
        let mut snapshot = self.load().await?;
        let vm = snapshot
            .vms
            .remove(vm_id)
            .ok_or_else(|| DomainError::NotFound(format!("VM {}", vm_id)))?;

        let nics: Vec<VmNic> = vm.nics.into_iter().map(normalize).collect();
        debug!(vm_id, nics = nics.len(), "Inventory NICs read");
        Ok(nics)
    }
}

#[async_trait]
impl RoutedNetworkTopology for JsonInventory {
    async fn gateway_for_network(&self, network_name: &str) -> Result<GatewayRef, DomainError> {
        let mut snapshot = self.load().await?;
        snapshot
            .networks
            .remove(network_name)
            .and_then(|network| network.gateway)
            .ok_or_else(|| {
                DomainError::NotFound(format!("gateway for network {}", network_name))
            })
    }
}

#[async_trait]
impl DhcpLeaseSource for JsonInventory {
    async fn fetch_leases(&self, gateway: &GatewayRef) -> Result<Vec<DhcpLease>, DomainError> {
        let mut snapshot = self.load().await?;
        let leases = snapshot
            .gateways
            .remove(&gateway.id)
            .and_then(|entry| entry.leases)
            .ok_or_else(|| DomainError::NotFound(format!("lease table of gateway {}", gateway)))?;

        debug!(gateway = %gateway, leases = leases.len(), "Inventory leases read");
        Ok(leases)
    }
}
