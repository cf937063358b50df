//! `faultline probe` command handler

use std::io::Write;

use serde::Serialize;
use tracing::warn;

use faultline_core::config::BinariesConfig;
use faultline_core::environment::{Capability, Environment};
use faultline_scenarios::Capabilities;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `probe` command.
///
/// Reports what the generators would see. An unknown installed version is
/// reported, not returned as an error.
pub fn execute<E: Environment + ?Sized>(env: &E, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_probe_report(env);
    writer.render(&report)
}

fn build_probe_report<E: Environment + ?Sized>(env: &E) -> ProbeReport {
    let (installed_version, version_error) = match env.installed_version(&env.binaries().etcd) {
        Ok(v) => (Some(v.to_string()), None),
        Err(e) => {
            warn!(error = %e, "installed version unknown");
            (None, Some(e.to_string()))
        }
    };

    ProbeReport {
        binaries: env.binaries().clone(),
        installed_version,
        version_error,
        capabilities: Capabilities::probe(env),
    }
}

/// Environment probe report.
#[derive(Serialize)]
pub struct ProbeReport {
    pub binaries: BinariesConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_error: Option<String>,
    pub capabilities: Capabilities,
}

fn status(cap: &Capability) -> String {
    use colored::Colorize;

    match cap {
        Capability::Available => "available".green().to_string(),
        Capability::Unavailable { reason } => format!("{} ({reason})", "unavailable".yellow()),
    }
}

impl Render for ProbeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Binaries:")?;
        writeln!(w, "  etcd:              {}", self.binaries.etcd.display())?;
        writeln!(
            w,
            "  etcd_last_release: {}",
            self.binaries.etcd_last_release.display()
        )?;
        writeln!(w, "  lazyfs:            {}", self.binaries.lazyfs.display())?;
        writeln!(w)?;

        match (&self.installed_version, &self.version_error) {
            (Some(v), _) => writeln!(w, "Installed version: {}", v.bold())?,
            (None, Some(e)) => writeln!(w, "Installed version: {} {}", "UNKNOWN".red().bold(), e)?,
            (None, None) => writeln!(w, "Installed version: {}", "UNKNOWN".red().bold())?,
        }
        writeln!(w)?;

        writeln!(w, "Capabilities:")?;
        writeln!(w, "  lazyfs:              {}", status(&self.capabilities.lazyfs))?;
        writeln!(
            w,
            "  last release binary: {}",
            status(&self.capabilities.last_release_binary)
        )?;
        for (tunable, cap) in &self.capabilities.tunables {
            writeln!(w, "  {:<20} {}", format!("{tunable}:"), status(cap))?;
        }
        Ok(())
    }
}
