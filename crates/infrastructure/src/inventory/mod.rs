pub mod json_inventory;
pub mod snapshot;

pub use json_inventory::JsonInventory;
pub use snapshot::InventorySnapshot;
