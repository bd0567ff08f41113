use crate::report::VmReport;
use futures::future::join_all;
use nicprobe_application::use_cases::ResolveNicAddressesUseCase;
use nicprobe_domain::config::ResolutionConfig;
use tracing::{error, info};

/// Resolves every VM concurrently; each VM runs its own independent loop.
pub async fn resolve_all(
    use_case: &ResolveNicAddressesUseCase,
    vm_ids: &[String],
    nic_indexes: &[i64],
    cfg: &ResolutionConfig,
) -> Vec<VmReport> {
    let runs = vm_ids.iter().map(|vm_id| async move {
        let result = use_case
            .execute(vm_id, nic_indexes, cfg.max_wait_secs, cfg.use_lease_fallback)
            .await;

        match &result {
            Ok(resolution) => info!(
                vm_id = %vm_id,
                resolved = resolution.resolved_count(),
                timed_out = resolution.timed_out,
                "VM address resolution finished"
            ),
            Err(e) => error!(vm_id = %vm_id, error = %e, "VM address resolution failed"),
        }

        VmReport::from_result(vm_id, result)
    });

    join_all(runs).await
}
