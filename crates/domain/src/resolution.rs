use crate::tracking::NicTrackingRecord;
use serde::{Deserialize, Serialize};

/// Outcome of one address resolution call.
///
/// `addresses` is aligned with the requested NIC indexes; an unresolved NIC
/// shows up as an empty string, never as a missing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResolution {
    pub addresses: Vec<String>,
    pub timed_out: bool,
}

impl AddressResolution {
    pub fn from_records(records: &[NicTrackingRecord], timed_out: bool) -> Self {
        Self {
            addresses: records
                .iter()
                .map(|r| r.resolved_ip().unwrap_or_default().to_string())
                .collect(),
            timed_out,
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.addresses.iter().filter(|a| !a.is_empty()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.addresses.iter().all(|a| !a.is_empty())
    }
}
