//! `faultline config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use faultline_core::config::FaultlineConfig;
use faultline_core::error::FaultlineError;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Label used when no configuration file was given.
const DEFAULTS_SOURCE: &str = "(defaults + environment)";

/// Execute the `config` command.
pub fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, section, writer),
    }
}

fn load(config_path: Option<&Path>) -> Result<FaultlineConfig, FaultlineError> {
    match config_path {
        Some(path) => FaultlineConfig::load(path),
        None => FaultlineConfig::from_env(),
    }
}

fn source_label(config_path: Option<&Path>) -> String {
    config_path.map_or_else(|| DEFAULTS_SOURCE.to_owned(), |p| p.display().to_string())
}

/// Execute the config validate subcommand.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (invalid values, parse errors, missing file).
fn execute_validate(config_path: Option<&Path>, writer: &OutputWriter) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(source = %source, "validating configuration");

    let report = match load(config_path) {
        Ok(_) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if the section name is unknown.
fn execute_show(
    config_path: Option<&Path>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(source = %source, "loading configuration");

    let config = load(config_path)?;
    let report = build_config_report(&config, source, section)?;
    writer.render(&report)
}

fn build_config_report(
    config: &FaultlineConfig,
    source: String,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section.as_deref() {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("binaries") => toml::to_string_pretty(&config.binaries),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: general, binaries)"
            )));
        }
    }
    .unwrap_or_else(|e| format!("(serialization error: {e})"));

    Ok(ConfigReport {
        source,
        section,
        config_toml,
    })
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration source
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration source
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Render>(report: &T) -> String {
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_config_report_full_config() {
        let report =
            build_config_report(&FaultlineConfig::default(), "faultline.toml".to_owned(), None)
                .unwrap();
        let output = render(&report);
        assert!(output.contains("faultline.toml"), "should contain source");
        assert!(output.contains("[general]"), "should contain general section");
        assert!(output.contains("[binaries]"), "should contain binaries section");
        assert!(output.contains("etcd_last_release"));
    }

    #[test]
    fn test_config_report_binaries_section() {
        let report = build_config_report(
            &FaultlineConfig::default(),
            DEFAULTS_SOURCE.to_owned(),
            Some("binaries".to_owned()),
        )
        .unwrap();
        let output = render(&report);
        assert!(output.contains("[binaries]"), "should show section label");
        assert!(output.contains("lazyfs = \"bin/lazyfs\""));
        assert!(!output.contains("log_level"));
    }

    #[test]
    fn test_config_report_unknown_section() {
        let err = build_config_report(
            &FaultlineConfig::default(),
            DEFAULTS_SOURCE.to_owned(),
            Some("ebpf".to_owned()),
        )
        .err()
        .expect("unknown section should fail");
        assert!(err.to_string().contains("unknown section: ebpf"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_report_json_skips_toml() {
        let report = ConfigReport {
            source: "test.toml".to_owned(),
            section: Some("general".to_owned()),
            config_toml: "log_level = \"info\"".to_owned(),
        };
        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(json["source"], "test.toml");
        assert_eq!(json["section"], "general");
        assert!(json.get("config_toml").is_none(), "config_toml should be skipped");
    }

    #[test]
    fn test_config_validation_report_valid() {
        let report = ConfigValidationReport {
            source: "faultline.toml".to_owned(),
            valid: true,
            errors: Vec::new(),
        };
        let output = render(&report);
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_config_validation_report_invalid() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["invalid value for general.log_level".to_owned()],
        };
        let output = render(&report);
        assert!(output.contains("INVALID"));
        assert!(output.contains("general.log_level"));
    }

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(None), DEFAULTS_SOURCE);
        assert_eq!(
            source_label(Some(Path::new("/etc/faultline.toml"))),
            "/etc/faultline.toml"
        );
    }
}
