use nicprobe_domain::{DomainError, NicIndex, NicObservation};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::NetworkConfigReader;

pub type NicObservations = FxHashMap<NicIndex, NicObservation>;

/// Reads the VM's network configuration and keeps only the tracked NICs.
pub struct NicObservationFetcher {
    reader: Arc<dyn NetworkConfigReader>,
}

impl NicObservationFetcher {
    pub fn new(reader: Arc<dyn NetworkConfigReader>) -> Self {
        Self { reader }
    }

    /// NICs missing from the VM are left out of the result; callers treat
    /// that the same as a NIC without a reported address.
    #[instrument(skip(self, tracked), fields(tracked = tracked.len()))]
    pub async fn observe(
        &self,
        vm_id: &str,
        tracked: &[NicIndex],
    ) -> Result<NicObservations, DomainError> {
        let nics = self.reader.read_nics(vm_id).await.map_err(|e| {
            DomainError::NetworkConfigReadFailed {
                vm_id: vm_id.to_string(),
                source: Box::new(e),
            }
        })?;

        let observations: NicObservations = nics
            .iter()
            .filter(|nic| tracked.contains(&nic.index))
            .map(|nic| (nic.index, NicObservation::from(nic)))
            .collect();

        debug!(
            reported = nics.len(),
            matched = observations.len(),
            "Network configuration observed"
        );
        Ok(observations)
    }
}
