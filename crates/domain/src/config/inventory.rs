use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryConfig {
    /// JSON snapshot describing VMs, routed networks and gateway leases
    #[serde(default = "default_inventory_path")]
    pub path: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: default_inventory_path(),
        }
    }
}

fn default_inventory_path() -> String {
    "inventory.json".to_string()
}
