use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    /// Upper bound on wall-clock time for one resolution call
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,

    /// Seconds between two polling ticks
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Consult gateway DHCP lease tables when guest tools have not reported
    #[serde(default)]
    pub use_lease_fallback: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: default_max_wait_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            use_lease_fallback: false,
        }
    }
}

fn default_max_wait_secs() -> u64 {
    60
}

fn default_poll_interval_secs() -> u64 {
    3
}
