use nicprobe_domain::{DomainError, GatewayRef, NicTrackingRecord};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::{NetworkConfigReader, RoutedNetworkTopology};

/// Finds the gateway, if any, behind each tracked NIC's network.
pub struct GatewayTopologyResolver {
    reader: Arc<dyn NetworkConfigReader>,
    topology: Arc<dyn RoutedNetworkTopology>,
}

impl GatewayTopologyResolver {
    pub fn new(
        reader: Arc<dyn NetworkConfigReader>,
        topology: Arc<dyn RoutedNetworkTopology>,
    ) -> Self {
        Self { reader, topology }
    }

    /// `Ok(None)` when the network is not attached to a gateway.
    pub async fn resolve_gateway_for_network(
        &self,
        network_name: &str,
    ) -> Result<Option<GatewayRef>, DomainError> {
        match self.topology.gateway_for_network(network_name).await {
            Ok(gateway) => Ok(Some(gateway)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Assigns a gateway state to every record that does not have one yet.
    ///
    /// Each distinct network is looked up once. A NIC that is not present on
    /// the VM is marked as not routed.
    #[instrument(skip(self, records), fields(nics = records.len()))]
    pub async fn resolve_gateways(
        &self,
        vm_id: &str,
        records: &mut [NicTrackingRecord],
    ) -> Result<(), DomainError> {
        let nics = self.reader.read_nics(vm_id).await.map_err(|e| {
            DomainError::NetworkConfigReadFailed {
                vm_id: vm_id.to_string(),
                source: Box::new(e),
            }
        })?;

        let mut by_network: FxHashMap<String, Option<GatewayRef>> = FxHashMap::default();

        for record in records.iter_mut() {
            let Some(nic) = nics.iter().find(|nic| nic.index == record.index()) else {
                debug!(nic = %record.index(), "NIC not present on VM, skipping topology lookup");
                record.assign_gateway(None);
                continue;
            };

            let gateway = match by_network.get(&nic.network) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved = self
                        .resolve_gateway_for_network(&nic.network)
                        .await
                        .map_err(|e| DomainError::GatewayLookupFailed {
                            nic: record.index(),
                            network: nic.network.clone(),
                            source: Box::new(e),
                        })?;
                    by_network.insert(nic.network.clone(), resolved.clone());
                    resolved
                }
            };

            debug!(
                nic = %record.index(),
                network = %nic.network,
                routed = gateway.is_some(),
                "NIC topology resolved"
            );
            record.assign_gateway(gateway);
        }

        Ok(())
    }
}
