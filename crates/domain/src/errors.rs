use crate::nic::NicIndex;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Invalid response from collaborator: {0}")]
    InvalidResponse(String),

    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read network configuration of VM {vm_id}: {source}")]
    NetworkConfigReadFailed {
        vm_id: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Failed to resolve gateway for NIC {nic} on network '{network}': {source}")]
    GatewayLookupFailed {
        nic: NicIndex,
        network: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Failed to fetch DHCP leases from gateway {gateway}: {source}")]
    LeaseFetchFailed {
        gateway: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// "Not found" is an expected negative answer from a collaborator, not a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DomainError::InvalidArgument(_))
    }
}
