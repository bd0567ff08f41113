use nicprobe_application::ports::{DhcpLeaseSource, NetworkConfigReader, RoutedNetworkTopology};
use nicprobe_application::use_cases::ResolveNicAddressesUseCase;
use nicprobe_domain::{DomainError, GatewayRef, LeaseBindingState, NicIndex};
use nicprobe_infrastructure::inventory::JsonInventory;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

const INVENTORY: &str = r#"{
  "vms": {
    "vm-1": {
      "nics": [
        { "index": 0, "network": "routed-a", "ip_address": "10.0.0.5",
          "mac_address": "00:50:56:00:00:01", "connected": true },
        { "index": 1, "network": "routed-a", "mac_address": "00:50:56:00:00:02",
          "connected": true },
        { "index": 2, "network": "isolated", "connected": false }
      ]
    }
  },
  "networks": {
    "routed-a": { "gateway": { "id": "gw-1", "name": "edge-1" } },
    "isolated": { "gateway": null }
  },
  "gateways": {
    "gw-1": {
      "leases": [
        { "mac_address": "00:50:56:00:00:02", "ip_address": "10.0.0.9",
          "binding_state": "active" },
        { "mac_address": "00:50:56:00:00:03", "ip_address": "10.0.0.10",
          "binding_state": "free" }
      ]
    },
    "gw-2": {}
  }
}"#;

fn write_inventory(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[tokio::test]
async fn test_read_nics_for_known_vm() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let nics = inventory.read_nics("vm-1").await.unwrap();

    assert_eq!(nics.len(), 3);
    assert_eq!(nics[0].index, NicIndex::new(0));
    assert_eq!(nics[0].ip_address.as_deref(), Some("10.0.0.5"));
    assert!(nics[1].ip_address.is_none());
    assert_eq!(nics[1].mac_address.as_deref(), Some("00:50:56:00:00:02"));
    assert!(!nics[2].connected);
}

#[tokio::test]
async fn test_unknown_vm_is_not_found() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let result = inventory.read_nics("vm-404").await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_gateway_for_routed_network() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let gateway = inventory.gateway_for_network("routed-a").await.unwrap();

    assert_eq!(gateway, GatewayRef::new("gw-1", "edge-1"));
}

#[tokio::test]
async fn test_isolated_and_unknown_networks_are_not_found() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let isolated = inventory.gateway_for_network("isolated").await;
    let unknown = inventory.gateway_for_network("nowhere").await;

    assert!(isolated.unwrap_err().is_not_found());
    assert!(unknown.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_fetch_leases_for_gateway() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let leases = inventory
        .fetch_leases(&GatewayRef::new("gw-1", "edge-1"))
        .await
        .unwrap();

    assert_eq!(leases.len(), 2);
    assert!(leases[0].is_active());
    assert_eq!(leases[1].binding_state, LeaseBindingState::Free);
}

#[tokio::test]
async fn test_gateway_without_lease_table_is_not_found() {
    let file = write_inventory(INVENTORY);
    let inventory = JsonInventory::new(file.path());

    let without_table = inventory.fetch_leases(&GatewayRef::new("gw-2", "")).await;
    let unknown = inventory.fetch_leases(&GatewayRef::new("gw-9", "")).await;

    assert!(without_table.unwrap_err().is_not_found());
    assert!(unknown.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_nonexistent_inventory_file() {
    let inventory = JsonInventory::new("/nonexistent/inventory.json");

    let result = inventory.read_nics("vm-1").await;

    assert!(matches!(result, Err(DomainError::IoError(_))));
}

#[tokio::test]
async fn test_malformed_inventory_file() {
    let file = write_inventory("{ \"vms\": [ not json");
    let inventory = JsonInventory::new(file.path());

    let result = inventory.read_nics("vm-1").await;

    assert!(matches!(result, Err(DomainError::InvalidResponse(_))));
}

// ============================================================================
// Tests: end-to-end resolution over the inventory adapter
// ============================================================================

fn use_case_for(inventory: Arc<JsonInventory>) -> ResolveNicAddressesUseCase {
    ResolveNicAddressesUseCase::new(inventory.clone(), inventory.clone(), inventory)
        .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_resolution_uses_lease_fallback_over_inventory() {
    let file = write_inventory(INVENTORY);
    let use_case = use_case_for(Arc::new(JsonInventory::new(file.path())));

    let result = use_case.execute("vm-1", &[0, 1], 5, true).await.unwrap();

    assert_eq!(
        result.addresses,
        vec!["10.0.0.5".to_string(), "10.0.0.9".to_string()]
    );
    assert!(!result.timed_out);
}

#[tokio::test]
async fn test_resolution_without_fallback_times_out_on_partial_data() {
    let file = write_inventory(INVENTORY);
    let use_case = use_case_for(Arc::new(JsonInventory::new(file.path())));

    let result = use_case.execute("vm-1", &[0, 1, 2], 1, false).await.unwrap();

    assert_eq!(
        result.addresses,
        vec!["10.0.0.5".to_string(), String::new(), String::new()]
    );
    assert!(result.timed_out);
}

#[tokio::test]
async fn test_resolution_picks_up_inventory_changes_while_polling() {
    let file = write_inventory(INVENTORY);
    let path = file.path().to_path_buf();
    let use_case = use_case_for(Arc::new(JsonInventory::new(&path)));

    let updated = INVENTORY.replace(
        r#""index": 2, "network": "isolated", "connected": false"#,
        r#""index": 2, "network": "isolated", "ip_address": "192.168.5.2", "connected": true"#,
    );
    assert_ne!(updated, INVENTORY);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        // Replace atomically so the poller never reads a half-written file
        let staged = path.with_extension("staged");
        tokio::fs::write(&staged, updated).await.unwrap();
        tokio::fs::rename(&staged, &path).await.unwrap();
    });

    let result = use_case.execute("vm-1", &[2], 5, false).await.unwrap();

    assert_eq!(result.addresses, vec!["192.168.5.2".to_string()]);
    assert!(!result.timed_out);
}
