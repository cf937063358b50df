//! Small registries for matrix tests.

use faultline_core::types::{LoadProfile, Workload, WorkloadProfile};
use faultline_scenarios::WorkloadRegistry;

/// Two entries: (W1, LowTraffic), (W2, HighTraffic).
pub fn two_entries() -> WorkloadRegistry {
    WorkloadRegistry::new(vec![
        WorkloadProfile::new(Workload::new("W1"), LoadProfile::low_traffic()),
        WorkloadProfile::new(Workload::new("W2"), LoadProfile::high_traffic()),
    ])
    .expect("valid registry")
}
