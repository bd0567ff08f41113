use async_trait::async_trait;
use nicprobe_domain::{DhcpLease, DomainError, GatewayRef};

#[async_trait]
pub trait DhcpLeaseSource: Send + Sync {
    /// All lease records known to the gateway's DHCP server.
    ///
    /// Returns [`DomainError::NotFound`] when the gateway has no lease table.
    async fn fetch_leases(&self, gateway: &GatewayRef) -> Result<Vec<DhcpLease>, DomainError>;
}
