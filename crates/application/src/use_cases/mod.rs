pub mod addresses;

pub use addresses::ResolveNicAddressesUseCase;
