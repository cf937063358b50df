//! Command handlers -- one module per subcommand

pub mod config;
pub mod list;
pub mod probe;
pub mod resolve;
pub mod show;

use faultline_core::environment::Environment;
use faultline_scenarios::{
    ExploratoryGenerator, RegressionCatalog, RegressionGenerator, Scenario, WorkloadRegistry,
};
use tracing::info;

use crate::cli::Suite;
use crate::error::CliError;

/// A scenario tagged with the generator that produced it.
pub struct Generated {
    pub suite: Suite,
    pub scenario: Scenario,
}

/// Run the generators selected by `suite` against `env`.
///
/// `All` runs exploratory first, then regression. A broken environment
/// aborts the whole call, even if the exploratory part succeeded.
pub fn generate<E: Environment + ?Sized>(suite: Suite, env: &E) -> Result<Vec<Generated>, CliError> {
    let mut out = Vec::new();

    if matches!(suite, Suite::Exploratory | Suite::All) {
        let registry = WorkloadRegistry::robustness();
        let scenarios = ExploratoryGenerator::new(&registry).generate_from(env)?;
        out.extend(scenarios.into_iter().map(|scenario| Generated {
            suite: Suite::Exploratory,
            scenario,
        }));
    }

    if matches!(suite, Suite::Regression | Suite::All) {
        let catalog = RegressionCatalog::etcd();
        let scenarios = RegressionGenerator::new(&catalog).generate(env)?;
        out.extend(scenarios.into_iter().map(|scenario| Generated {
            suite: Suite::Regression,
            scenario,
        }));
    }

    info!(suite = ?suite, count = out.len(), "scenarios generated");
    Ok(out)
}

/// Find one scenario by exact name.
pub fn find<E: Environment + ?Sized>(name: &str, suite: Suite, env: &E) -> Result<Generated, CliError> {
    generate(suite, env)?
        .into_iter()
        .find(|g| g.scenario.name() == name)
        .ok_or_else(|| CliError::Command(format!("unknown scenario: {name}")))
}
