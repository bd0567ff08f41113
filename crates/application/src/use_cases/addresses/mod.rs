pub mod resolve_nic_addresses;

pub use resolve_nic_addresses::ResolveNicAddressesUseCase;
