#![allow(dead_code)]

use async_trait::async_trait;
use nicprobe_application::ports::{DhcpLeaseSource, NetworkConfigReader, RoutedNetworkTopology};
use nicprobe_domain::{DhcpLease, DomainError, GatewayRef, VmNic};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Replays one scripted NIC list per call; the last entry repeats forever.
#[derive(Clone, Default)]
pub struct MockNetworkConfigReader {
    script: Arc<std::sync::RwLock<Vec<Result<Vec<VmNic>, DomainError>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockNetworkConfigReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nics(nics: Vec<VmNic>) -> Self {
        let reader = Self::new();
        reader.push(nics);
        reader
    }

    pub fn push(&self, nics: Vec<VmNic>) {
        self.script.write().unwrap().push(Ok(nics));
    }

    pub fn push_error(&self, error: DomainError) {
        self.script.write().unwrap().push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkConfigReader for MockNetworkConfigReader {
    async fn read_nics(&self, _vm_id: &str) -> Result<Vec<VmNic>, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self.script.read().unwrap();
        match script.get(call).or_else(|| script.last()) {
            Some(response) => response.clone(),
            None => Ok(Vec::new()),
        }
    }
}

/// Networks not registered here are reported as not routed.
#[derive(Clone, Default)]
pub struct MockRoutedNetworkTopology {
    networks: Arc<std::sync::RwLock<HashMap<String, Result<GatewayRef, DomainError>>>>,
    queried: Arc<RwLock<Vec<String>>>,
}

impl MockRoutedNetworkTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gateway(self, network: &str, gateway: GatewayRef) -> Self {
        self.networks
            .write()
            .unwrap()
            .insert(network.to_string(), Ok(gateway));
        self
    }

    pub fn with_error(self, network: &str, error: DomainError) -> Self {
        self.networks
            .write()
            .unwrap()
            .insert(network.to_string(), Err(error));
        self
    }

    pub fn queried_networks(&self) -> Vec<String> {
        self.queried
            .try_read()
            .map(|queried| queried.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queried.try_read().map(|queried| queried.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RoutedNetworkTopology for MockRoutedNetworkTopology {
    async fn gateway_for_network(&self, network_name: &str) -> Result<GatewayRef, DomainError> {
        self.queried.write().await.push(network_name.to_string());
        self.networks
            .read()
            .unwrap()
            .get(network_name)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NotFound(format!("network {}", network_name))))
    }
}

/// Per-gateway scripted lease tables; the last entry repeats forever.
/// Unknown gateways answer with `NotFound`.
#[derive(Clone, Default)]
pub struct MockDhcpLeaseSource {
    scripts: Arc<std::sync::RwLock<HashMap<String, Vec<Result<Vec<DhcpLease>, DomainError>>>>>,
    calls: Arc<std::sync::RwLock<HashMap<String, usize>>>,
}

impl MockDhcpLeaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, gateway_id: &str, leases: Vec<DhcpLease>) {
        self.scripts
            .write()
            .unwrap()
            .entry(gateway_id.to_string())
            .or_default()
            .push(Ok(leases));
    }

    pub fn push_error(&self, gateway_id: &str, error: DomainError) {
        self.scripts
            .write()
            .unwrap()
            .entry(gateway_id.to_string())
            .or_default()
            .push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().values().sum()
    }

    pub fn calls_for(&self, gateway_id: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .get(gateway_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DhcpLeaseSource for MockDhcpLeaseSource {
    async fn fetch_leases(&self, gateway: &GatewayRef) -> Result<Vec<DhcpLease>, DomainError> {
        let call = {
            let mut calls = self.calls.write().unwrap();
            let count = calls.entry(gateway.id.clone()).or_insert(0);
            *count += 1;
            *count - 1
        };

        let scripts = self.scripts.read().unwrap();
        match scripts.get(&gateway.id) {
            Some(script) => script
                .get(call)
                .or_else(|| script.last())
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new())),
            None => Err(DomainError::NotFound(format!(
                "lease table for gateway {}",
                gateway.id
            ))),
        }
    }
}
