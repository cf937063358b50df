//! `faultline list` command handler

use std::io::Write;

use serde::Serialize;

use faultline_cluster::FirstGroupChooser;
use faultline_core::environment::Environment;

use crate::cli::{ListArgs, Suite};
use crate::commands::{self, Generated};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `list` command.
pub fn execute<E: Environment + ?Sized>(
    args: ListArgs,
    env: &E,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let generated = commands::generate(args.suite, env)?;
    let report = build_list_report(args.suite, &generated)?;
    writer.render(&report)
}

fn build_list_report(suite: Suite, generated: &[Generated]) -> Result<ScenarioList, CliError> {
    let scenarios = generated
        .iter()
        .map(|g| -> Result<ScenarioSummary, CliError> {
            let scenario = &g.scenario;
            // axes never change the topology size
            let cluster_size = scenario
                .cluster()
                .resolve(&mut FirstGroupChooser)?
                .descriptor
                .cluster_size;
            Ok(ScenarioSummary {
                name: scenario.name().to_owned(),
                suite: g.suite,
                cluster_size,
                fault: scenario.fault().map(|f| f.name.clone()),
                axes: scenario
                    .cluster()
                    .axes()
                    .iter()
                    .map(|a| a.name().to_owned())
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScenarioList { suite, scenarios })
}

/// Scenario listing.
#[derive(Serialize)]
pub struct ScenarioList {
    pub suite: Suite,
    pub scenarios: Vec<ScenarioSummary>,
}

/// One line of the listing.
#[derive(Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub suite: Suite,
    pub cluster_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
    pub axes: Vec<String>,
}

impl Render for ScenarioList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.scenarios.is_empty() {
            writeln!(w, "No scenarios generated.")?;
            return Ok(());
        }

        writeln!(
            w,
            "{:<56} {:<12} {:>4}  {:<36} {}",
            "Name".bold(),
            "Suite".bold(),
            "Size".bold(),
            "Fault".bold(),
            "Axes".bold()
        )?;
        writeln!(w, "{}", "-".repeat(120))?;

        for s in &self.scenarios {
            let suite = match s.suite {
                Suite::Exploratory => "exploratory",
                Suite::Regression => "regression",
                Suite::All => "all",
            };
            writeln!(
                w,
                "{:<56} {:<12} {:>4}  {:<36} {}",
                s.name,
                suite,
                s.cluster_size,
                s.fault.as_deref().unwrap_or("-"),
                if s.axes.is_empty() {
                    "-".dimmed().to_string()
                } else {
                    s.axes.join(", ")
                }
            )?;
        }

        writeln!(w)?;
        writeln!(w, "Total: {} scenarios", self.scenarios.len())?;
        Ok(())
    }
}
