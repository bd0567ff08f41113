pub mod gateway_topology_resolver;
pub mod lease_lookup;
pub mod nic_observation_fetcher;

pub use gateway_topology_resolver::GatewayTopologyResolver;
pub use lease_lookup::LeaseLookup;
pub use nic_observation_fetcher::{NicObservationFetcher, NicObservations};
