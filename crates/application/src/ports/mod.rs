mod dhcp_lease_source;
mod network_config_reader;
mod routed_network_topology;

pub use dhcp_lease_source::DhcpLeaseSource;
pub use network_config_reader::NetworkConfigReader;
pub use routed_network_topology::RoutedNetworkTopology;
