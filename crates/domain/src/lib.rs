//! nicprobe domain layer
pub mod config;
pub mod dhcp_lease;
pub mod errors;
pub mod gateway;
pub mod nic;
pub mod resolution;
pub mod tracking;

pub use config::{CliOverrides, Config, ConfigError};
pub use dhcp_lease::{DhcpLease, LeaseBindingState};
pub use errors::DomainError;
pub use gateway::GatewayRef;
pub use nic::{NicIndex, NicObservation, VmNic};
pub use resolution::AddressResolution;
pub use tracking::{GatewayState, NicTrackingRecord};
