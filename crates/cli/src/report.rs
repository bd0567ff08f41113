use nicprobe_domain::{AddressResolution, DomainError};
use serde::Serialize;

/// One line of output per VM.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VmReport {
    Resolved {
        vm_id: String,
        addresses: Vec<String>,
        timed_out: bool,
    },
    Failed {
        vm_id: String,
        error: String,
    },
}

impl VmReport {
    pub fn from_result(vm_id: &str, result: Result<AddressResolution, DomainError>) -> Self {
        match result {
            Ok(resolution) => VmReport::Resolved {
                vm_id: vm_id.to_string(),
                addresses: resolution.addresses,
                timed_out: resolution.timed_out,
            },
            Err(e) => VmReport::Failed {
                vm_id: vm_id.to_string(),
                error: e.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, VmReport::Failed { .. })
    }
}
