use async_trait::async_trait;
use nicprobe_domain::{DomainError, VmNic};

#[async_trait]
pub trait NetworkConfigReader: Send + Sync {
    /// Current NIC list of a VM. IPs may be missing or stale until guest
    /// tooling reports them.
    async fn read_nics(&self, vm_id: &str) -> Result<Vec<VmNic>, DomainError>;
}
