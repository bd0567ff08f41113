use crate::gateway::GatewayRef;
use crate::nic::{NicIndex, NicObservation};

/// Where a tracked NIC's network sits in the routed topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayState {
    /// Topology has not been looked up (lease fallback disabled, or not yet run).
    Unknown,
    Routed(GatewayRef),
    NotRouted,
}

/// Per-NIC state owned by a single address resolution call.
///
/// The resolved IP is written once and never changed afterwards; the
/// gateway is assigned at most once.
#[derive(Debug, Clone)]
pub struct NicTrackingRecord {
    index: NicIndex,
    resolved_ip: Option<String>,
    mac_address: Option<String>,
    gateway: GatewayState,
}

impl NicTrackingRecord {
    pub fn new(index: NicIndex) -> Self {
        Self {
            index,
            resolved_ip: None,
            mac_address: None,
            gateway: GatewayState::Unknown,
        }
    }

    pub fn index(&self) -> NicIndex {
        self.index
    }

    pub fn resolved_ip(&self) -> Option<&str> {
        self.resolved_ip.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_ip.is_some()
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.mac_address.as_deref()
    }

    pub fn gateway_state(&self) -> &GatewayState {
        &self.gateway
    }

    pub fn gateway(&self) -> Option<&GatewayRef> {
        match &self.gateway {
            GatewayState::Routed(gateway) => Some(gateway),
            _ => None,
        }
    }

    /// Copies a fresh observation into an unresolved record.
    ///
    /// The MAC is refreshed even when no IP has been reported yet. Returns
    /// `true` if this observation resolved the NIC.
    pub fn apply_observation(&mut self, observation: &NicObservation) -> bool {
        if self.is_resolved() {
            return false;
        }

        if let Some(mac) = observation.mac_address.as_deref().filter(|m| !m.is_empty()) {
            self.mac_address = Some(mac.to_string());
        }

        match observation.ip_address.as_deref().filter(|ip| !ip.is_empty()) {
            Some(ip) => {
                self.resolved_ip = Some(ip.to_string());
                true
            }
            None => false,
        }
    }

    /// Resolves the NIC from a lease. No-op if it is already resolved.
    pub fn resolve_from_lease(&mut self, ip: &str) -> bool {
        if self.is_resolved() || ip.is_empty() {
            return false;
        }
        self.resolved_ip = Some(ip.to_string());
        true
    }

    /// Records the topology lookup outcome. Only the first assignment sticks.
    pub fn assign_gateway(&mut self, gateway: Option<GatewayRef>) -> bool {
        if self.gateway != GatewayState::Unknown {
            return false;
        }
        self.gateway = match gateway {
            Some(gateway) => GatewayState::Routed(gateway),
            None => GatewayState::NotRouted,
        };
        true
    }

    /// Gateway and MAC to correlate against lease tables, if the NIC is
    /// still unresolved and both are known.
    pub fn lease_candidate(&self) -> Option<(&GatewayRef, &str)> {
        if self.is_resolved() {
            return None;
        }
        match (self.gateway(), self.mac_address()) {
            (Some(gateway), Some(mac)) => Some((gateway, mac)),
            _ => None,
        }
    }
}
