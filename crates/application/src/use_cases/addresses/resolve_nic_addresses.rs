use crate::ports::{DhcpLeaseSource, NetworkConfigReader, RoutedNetworkTopology};
use crate::services::{GatewayTopologyResolver, LeaseLookup, NicObservationFetcher};
use nicprobe_domain::{AddressResolution, DomainError, NicIndex, NicTrackingRecord};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Use case: wait for DHCP-assigned addresses on a set of VM NICs
///
/// Guest-tool reports are always applied first on every tick. Gateway lease
/// tables are only consulted when lease fallback is enabled, and only for
/// NICs that are still unresolved, sit on a routed network and have a known
/// MAC. Running out of time is not an error: the partial result is returned
/// with `timed_out` set.
pub struct ResolveNicAddressesUseCase {
    observations: NicObservationFetcher,
    topology: GatewayTopologyResolver,
    lease_source: Arc<dyn DhcpLeaseSource>,
    poll_interval: Duration,
    shutdown: CancellationToken,
}

impl ResolveNicAddressesUseCase {
    pub fn new(
        network_config: Arc<dyn NetworkConfigReader>,
        topology: Arc<dyn RoutedNetworkTopology>,
        lease_source: Arc<dyn DhcpLeaseSource>,
    ) -> Self {
        Self {
            observations: NicObservationFetcher::new(network_config.clone()),
            topology: GatewayTopologyResolver::new(network_config, topology),
            lease_source,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Cancelling the token ends every in-flight call like an early deadline.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    #[instrument(skip(self, nic_indexes), fields(nics = nic_indexes.len()))]
    pub async fn execute(
        &self,
        vm_id: &str,
        nic_indexes: &[i64],
        max_wait_secs: u64,
        use_lease_fallback: bool,
    ) -> Result<AddressResolution, DomainError> {
        let indexes = validate_request(vm_id, nic_indexes, max_wait_secs)?;
        let mut records: Vec<NicTrackingRecord> =
            indexes.into_iter().map(NicTrackingRecord::new).collect();

        if use_lease_fallback {
            self.topology.resolve_gateways(vm_id, &mut records).await?;
        }

        let mut leases = LeaseLookup::new(self.lease_source.clone());
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = tokio::time::sleep(Duration::from_secs(max_wait_secs));
        tokio::pin!(deadline);

        let mut ticks = 0u32;
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    let resolution = AddressResolution::from_records(&records, true);
                    info!(
                        ticks,
                        resolved = resolution.resolved_count(),
                        total = records.len(),
                        "Address resolution cancelled"
                    );
                    return Ok(resolution);
                }
                _ = &mut deadline => {
                    let resolution = AddressResolution::from_records(&records, true);
                    info!(
                        ticks,
                        resolved = resolution.resolved_count(),
                        total = records.len(),
                        max_wait_secs,
                        "Address resolution timed out"
                    );
                    return Ok(resolution);
                }
                _ = ticker.tick() => {
                    ticks += 1;
                    if self
                        .poll_once(vm_id, &mut records, &mut leases, use_lease_fallback)
                        .await?
                    {
                        info!(ticks, total = records.len(), "All NICs resolved");
                        return Ok(AddressResolution::from_records(&records, false));
                    }
                }
            }
        }
    }

    /// One complete pass: guest-tool observation, then lease correlation.
    /// Returns `true` once every record is resolved.
    async fn poll_once(
        &self,
        vm_id: &str,
        records: &mut [NicTrackingRecord],
        leases: &mut LeaseLookup,
        use_lease_fallback: bool,
    ) -> Result<bool, DomainError> {
        let tracked: Vec<NicIndex> = records.iter().map(NicTrackingRecord::index).collect();
        let observed = self.observations.observe(vm_id, &tracked).await?;

        for record in records.iter_mut() {
            if let Some(observation) = observed.get(&record.index()) {
                if record.apply_observation(observation) {
                    debug!(
                        nic = %record.index(),
                        ip = record.resolved_ip().unwrap_or_default(),
                        "NIC address reported by guest tools"
                    );
                }
            }
        }

        if all_resolved(records) {
            return Ok(true);
        }
        if !use_lease_fallback {
            return Ok(false);
        }

        leases.begin_round();
        for record in records.iter_mut() {
            let Some((gateway, mac)) = record
                .lease_candidate()
                .map(|(gateway, mac)| (gateway.clone(), mac.to_string()))
            else {
                continue;
            };

            if let Some(ip) = leases.active_lease_for_mac(&gateway, &mac).await? {
                record.resolve_from_lease(&ip);
                debug!(
                    nic = %record.index(),
                    gateway = %gateway,
                    %mac,
                    %ip,
                    "NIC address found in DHCP lease table"
                );
            }
        }

        Ok(all_resolved(records))
    }
}

fn all_resolved(records: &[NicTrackingRecord]) -> bool {
    records.iter().all(NicTrackingRecord::is_resolved)
}

fn validate_request(
    vm_id: &str,
    nic_indexes: &[i64],
    max_wait_secs: u64,
) -> Result<Vec<NicIndex>, DomainError> {
    if vm_id.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "VM id cannot be empty".to_string(),
        ));
    }
    if nic_indexes.is_empty() {
        return Err(DomainError::InvalidArgument(
            "at least one NIC index is required".to_string(),
        ));
    }
    if max_wait_secs == 0 {
        return Err(DomainError::InvalidArgument(
            "max wait must be at least one second".to_string(),
        ));
    }

    let mut seen = FxHashSet::default();
    let mut indexes = Vec::with_capacity(nic_indexes.len());
    for &raw in nic_indexes {
        let index = NicIndex::try_from(raw)?;
        if !seen.insert(index) {
            return Err(DomainError::InvalidArgument(format!(
                "duplicate NIC index {}",
                index
            )));
        }
        indexes.push(index);
    }
    Ok(indexes)
}
