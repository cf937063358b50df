//! Faultline CLI -- list, inspect and resolve robustness test scenarios.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use faultline_core::config::{FaultlineConfig, GeneralConfig};
use faultline_scenarios::HostEnvironment;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        log_level,
        output,
        command,
    } = cli;
    let writer = OutputWriter::new(output);
    let config_path = config.as_deref();

    match command {
        Commands::List(args) => {
            let env = prepare(config_path, log_level.as_deref())?;
            commands::list::execute(args, &env, &writer)
        }
        Commands::Show(args) => {
            let env = prepare(config_path, log_level.as_deref())?;
            commands::show::execute(args, &env, &writer)
        }
        Commands::Resolve(args) => {
            let env = prepare(config_path, log_level.as_deref())?;
            commands::resolve::execute(args, &env, &writer)
        }
        Commands::Probe => {
            let env = prepare(config_path, log_level.as_deref())?;
            commands::probe::execute(&env, &writer)
        }
        Commands::Config(args) => {
            // the config under inspection may itself be broken
            let mut general = GeneralConfig::default();
            if let Some(level) = log_level {
                general.log_level = level;
            }
            init_logging(&general)?;
            commands::config::execute(args, config_path, &writer)
        }
    }
}

/// Load configuration, install logging and build the host environment.
fn prepare(config_path: Option<&Path>, log_level: Option<&str>) -> Result<HostEnvironment, CliError> {
    let config = load_config(config_path, log_level)?;
    init_logging(&config.general)?;
    debug!(
        etcd = %config.binaries.etcd.display(),
        etcd_last_release = %config.binaries.etcd_last_release.display(),
        lazyfs = %config.binaries.lazyfs.display(),
        "configuration loaded"
    );
    Ok(HostEnvironment::new(config.binaries))
}

/// Precedence: `--log-level` > env > file > defaults.
fn load_config(path: Option<&Path>, log_level: Option<&str>) -> Result<FaultlineConfig, CliError> {
    let mut config = match path {
        Some(path) => FaultlineConfig::load(path)?,
        None => FaultlineConfig::from_env()?,
    };
    if let Some(level) = log_level {
        config.general.log_level = level.to_owned();
        config.validate()?;
    }
    Ok(config)
}

fn init_logging(general: &GeneralConfig) -> Result<(), CliError> {
    logging::init_tracing(general).map_err(|e| CliError::Config(format!("{e:#}")))
}
