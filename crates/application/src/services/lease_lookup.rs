use nicprobe_domain::{DhcpLease, DomainError, GatewayRef};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::DhcpLeaseSource;

/// Call-scoped cache of gateway lease tables.
///
/// A gateway's table is fetched at most once per round and is only ever
/// replaced by a newer fetch, never dropped. Not shared between calls.
pub struct LeaseLookup {
    source: Arc<dyn DhcpLeaseSource>,
    leases: FxHashMap<String, Vec<DhcpLease>>,
    refreshed: FxHashSet<String>,
}

impl LeaseLookup {
    pub fn new(source: Arc<dyn DhcpLeaseSource>) -> Self {
        Self {
            source,
            leases: FxHashMap::default(),
            refreshed: FxHashSet::default(),
        }
    }

    /// Starts a new polling round; the next lookup per gateway refetches.
    pub fn begin_round(&mut self) {
        self.refreshed.clear();
    }

    pub fn cached_gateways(&self) -> usize {
        self.leases.len()
    }

    /// IP of the active lease bound to `mac` on this gateway, if any.
    pub async fn active_lease_for_mac(
        &mut self,
        gateway: &GatewayRef,
        mac: &str,
    ) -> Result<Option<String>, DomainError> {
        let leases = self.all_leases(gateway).await?;
        Ok(leases
            .iter()
            .find(|lease| lease.is_active_for(mac))
            .map(|lease| lease.ip_address.clone()))
    }

    pub async fn all_leases(&mut self, gateway: &GatewayRef) -> Result<&[DhcpLease], DomainError> {
        if !self.refreshed.contains(&gateway.id) {
            self.refresh(gateway).await?;
        }
        Ok(self
            .leases
            .get(&gateway.id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    async fn refresh(&mut self, gateway: &GatewayRef) -> Result<(), DomainError> {
        match self.source.fetch_leases(gateway).await {
            Ok(leases) => {
                debug!(gateway = %gateway, leases = leases.len(), "Lease table fetched");
                self.leases.insert(gateway.id.clone(), leases);
            }
            Err(e) if e.is_not_found() => {
                debug!(gateway = %gateway, "Gateway has no lease table");
                self.leases.entry(gateway.id.clone()).or_default();
            }
            Err(e) if self.leases.contains_key(&gateway.id) => {
                warn!(
                    error = %e,
                    gateway = %gateway,
                    "Lease table refresh failed, keeping previous table"
                );
            }
            Err(e) => {
                return Err(DomainError::LeaseFetchFailed {
                    gateway: gateway.to_string(),
                    source: Box::new(e),
                });
            }
        }

        self.refreshed.insert(gateway.id.clone());
        Ok(())
    }
}
