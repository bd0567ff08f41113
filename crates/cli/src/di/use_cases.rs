use nicprobe_application::use_cases::ResolveNicAddressesUseCase;
use nicprobe_domain::Config;
use nicprobe_infrastructure::inventory::JsonInventory;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub fn build_resolver(config: &Config, shutdown: CancellationToken) -> ResolveNicAddressesUseCase {
    let inventory = Arc::new(JsonInventory::new(&config.inventory.path));
    info!(path = %config.inventory.path, "Using inventory snapshot");

    ResolveNicAddressesUseCase::new(inventory.clone(), inventory.clone(), inventory)
        .with_poll_interval(Duration::from_secs(config.resolution.poll_interval_secs))
        .with_cancellation(shutdown)
}
