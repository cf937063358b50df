//! `faultline resolve` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use faultline_cluster::{Choice, ClusterDescriptor, MemberVersion, SeededChooser};
use faultline_core::environment::Environment;
use faultline_scenarios::Scenario;

use crate::cli::ResolveArgs;
use crate::commands;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `resolve` command.
pub fn execute<E: Environment + ?Sized>(
    args: ResolveArgs,
    env: &E,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let seed = args.seed.unwrap_or_else(fresh_seed);
    let generated = commands::find(&args.name, args.suite, env)?;
    info!(scenario = %args.name, seed, "resolving cluster plan");
    let report = resolve_scenario(&generated.scenario, seed)?;
    writer.render(&report)
}

/// Seed used when `--seed` is omitted. It is printed in the report so the run can be repeated.
fn fresh_seed() -> u64 {
    rand::random()
}

fn resolve_scenario(scenario: &Scenario, seed: u64) -> Result<ResolveReport, CliError> {
    let resolution = scenario.cluster().resolve(&mut SeededChooser::new(seed))?;
    resolution.descriptor.validate()?;

    Ok(ResolveReport {
        name: scenario.name().to_owned(),
        seed,
        member_versions: resolution.descriptor.member_versions(),
        descriptor: resolution.descriptor,
        choices: resolution.choices,
    })
}

/// Concrete cluster for one scenario and seed.
#[derive(Serialize)]
pub struct ResolveReport {
    pub name: String,
    pub seed: u64,
    pub descriptor: ClusterDescriptor,
    pub choices: Vec<Choice>,
    pub member_versions: Vec<MemberVersion>,
}

impl Render for ResolveReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let d = &self.descriptor;
        writeln!(w, "Scenario: {} (seed {})", self.name.bold(), self.seed)?;
        writeln!(w)?;
        writeln!(w, "Choices:")?;
        if self.choices.is_empty() {
            writeln!(w, "  {}", "(none)".dimmed())?;
        }
        for choice in &self.choices {
            writeln!(w, "  {:<40} {}", choice.axis, choice.group.green())?;
        }
        writeln!(w)?;
        writeln!(w, "Cluster:")?;
        writeln!(w, "  cluster_size:                   {}", d.cluster_size)?;
        writeln!(w, "  tick_ms:                        {}", d.tick_ms)?;
        writeln!(w, "  election_ms:                    {}", d.election_ms)?;
        writeln!(w, "  snapshot_count:                 {}", d.snapshot_count)?;
        writeln!(
            w,
            "  snapshot_catchup_entries:       {}",
            d.snapshot_catchup_entries
                .map_or_else(|| "-".to_owned(), |v| v.to_string())
        )?;
        writeln!(w, "  compaction_batch_limit:         {}", d.compaction_batch_limit)?;
        writeln!(
            w,
            "  watch_progress_notify_interval: {}ms",
            d.watch_progress_notify_interval.as_millis()
        )?;
        writeln!(w, "  gofail:                         {}", d.go_fail_enabled)?;
        writeln!(w, "  lazyfs:                         {}", d.lazyfs_enabled)?;
        writeln!(w, "  peer_tls:                       {}", d.peer_tls)?;
        writeln!(w, "  peer_proxy:                     {}", d.peer_proxy)?;
        writeln!(w, "  version:                        {}", d.version)?;
        writeln!(
            w,
            "  initial_leader_index:           {}",
            d.initial_leader_index
                .map_or_else(|| "-".to_owned(), |v| v.to_string())
        )?;
        let members: Vec<_> = self
            .member_versions
            .iter()
            .map(|v| match v {
                MemberVersion::Current => "current",
                MemberVersion::Last => "last",
            })
            .collect();
        writeln!(w, "  members:                        {}", members.join(", "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Suite;
    use crate::commands::testing::StubEnvironment;

    fn scenario(name: &str) -> Scenario {
        commands::find(name, Suite::All, &StubEnvironment::healthy())
            .unwrap()
            .scenario
    }

    #[test]
    fn test_fresh_seeds_span_full_range() {
        let seeds: Vec<u64> = (0..64).map(|_| fresh_seed()).collect();
        assert!(seeds.iter().any(|s| *s > u64::from(u32::MAX)));
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_resolve_is_reproducible_per_seed() {
        let s = scenario("Kubernetes/LowTraffic/ClusterOfSize3");
        for seed in [0, 7, 12345] {
            let a = resolve_scenario(&s, seed).unwrap();
            let b = resolve_scenario(&s, seed).unwrap();
            assert_eq!(a.descriptor, b.descriptor);
            assert_eq!(a.choices, b.choices);
        }
    }

    #[test]
    fn test_resolve_three_member_descriptor() {
        let report = resolve_scenario(&scenario("EtcdPut/HighTraffic/ClusterOfSize3"), 3).unwrap();
        assert_eq!(report.descriptor.cluster_size, 3);
        assert_eq!(report.member_versions.len(), 3);
        assert!(report.descriptor.peer_tls);
        assert!(report.choices.iter().any(|c| c.axis == "version-mix"));
    }

    #[test]
    fn test_resolve_deterministic_regression_has_no_choices() {
        let report = resolve_scenario(&scenario("Issue14685"), 99).unwrap();
        assert!(report.choices.is_empty());
        assert_eq!(report.descriptor.cluster_size, 1);
        assert!(report.descriptor.go_fail_enabled);
    }

    #[test]
    fn test_resolve_render_text() {
        let report = resolve_scenario(&scenario("Issue15271"), 1).unwrap();
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("seed 1"));
        assert!(output.contains("snapshot_catchup_entries:       100"));
        assert!(output.contains("members:                        current, current, current"));
    }
}
