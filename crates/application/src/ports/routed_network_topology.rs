use async_trait::async_trait;
use nicprobe_domain::{DomainError, GatewayRef};

#[async_trait]
pub trait RoutedNetworkTopology: Send + Sync {
    /// Gateway the network is attached to.
    ///
    /// Returns [`DomainError::NotFound`] when the network is not routed
    /// through a gateway.
    async fn gateway_for_network(&self, network_name: &str) -> Result<GatewayRef, DomainError>;
}
