//! `faultline show` command handler

use std::io::Write;

use serde::Serialize;

use faultline_cluster::Layer;
use faultline_core::environment::Environment;
use faultline_scenarios::Scenario;

use crate::cli::{ShowArgs, Suite};
use crate::commands;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `show` command.
pub fn execute<E: Environment + ?Sized>(
    args: ShowArgs,
    env: &E,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let generated = commands::find(&args.name, args.suite, env)?;
    let report = ScenarioDetail {
        suite: generated.suite,
        scenario: generated.scenario,
    };
    writer.render(&report)
}

/// Full scenario with its unresolved cluster plan.
#[derive(Serialize)]
pub struct ScenarioDetail {
    pub suite: Suite,
    #[serde(flatten)]
    pub scenario: Scenario,
}

impl Render for ScenarioDetail {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let s = &self.scenario;
        writeln!(w, "Scenario: {}", s.name().bold())?;
        writeln!(w, "  Workload: {}", s.workload())?;
        writeln!(w, "  Profile:  {}", s.profile())?;
        match s.fault() {
            Some(fault) => writeln!(w, "  Fault:    {}", fault.name.yellow())?,
            None => writeln!(w, "  Fault:    {}", "none".dimmed())?,
        }
        if let Some(watch) = s.watch() {
            writeln!(w, "  Watch:    request_progress={}", watch.request_progress)?;
        }
        writeln!(w, "  Cluster plan:")?;
        if s.cluster().layers().is_empty() {
            writeln!(w, "    {}", "(defaults)".dimmed())?;
        }
        render_layers(w, s.cluster().layers(), 2)
    }
}

/// `-` fixed option, `?` axis, `[group]` alternative with its selection probability.
fn render_layers(w: &mut dyn Write, layers: &[Layer], depth: usize) -> std::io::Result<()> {
    use colored::Colorize;

    let indent = "  ".repeat(depth);
    for layer in layers {
        match layer {
            Layer::Apply(option) => writeln!(w, "{indent}- {option}")?,
            Layer::Choose(axis) => {
                writeln!(
                    w,
                    "{indent}? {} ({} groups)",
                    axis.name().cyan(),
                    axis.groups().len()
                )?;
                for group in axis.groups() {
                    writeln!(
                        w,
                        "{indent}  [{}] weight={} p={:.0}%",
                        group.name(),
                        group.weight(),
                        axis.probability_of(group.name()) * 100.0
                    )?;
                    render_layers(w, group.layers(), depth + 2)?;
                }
            }
        }
    }
    Ok(())
}
