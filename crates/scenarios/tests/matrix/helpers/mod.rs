//! Shared matrix test helpers.

pub mod env;
pub mod registry;

use faultline_scenarios::Scenario;

/// Names of the given scenarios, in order.
pub fn names(scenarios: &[Scenario]) -> Vec<String> {
    scenarios.iter().map(|s| s.name().to_owned()).collect()
}

/// True if any scenario name contains the given path segment.
#[allow(dead_code)]
pub fn any_segment(scenarios: &[Scenario], segment: &str) -> bool {
    scenarios.iter().any(|s| s.segments().any(|seg| seg == segment))
}
