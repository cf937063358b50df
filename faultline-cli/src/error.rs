//! CLI-specific error types and exit code mapping

use faultline_cluster::DescriptorError;
use faultline_core::error::FaultlineError;
use faultline_scenarios::GenerationError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The test environment cannot be introspected (e.g. unknown binary version).
    #[error("broken test environment: {0}")]
    Environment(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from faultline-core.
    #[error("{0}")]
    Core(#[from] FaultlineError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                   |
    /// |------|---------------------------|
    /// | 0    | Success                   |
    /// | 1    | General / command error   |
    /// | 2    | Configuration error       |
    /// | 3    | Broken test environment   |
    /// | 10   | IO error                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Environment(_) => 3,
            Self::Io(_) => 10,
            Self::Core(FaultlineError::Config(_)) => 2,
            Self::Core(FaultlineError::Environment(_)) => 3,
            Self::Core(FaultlineError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<GenerationError> for CliError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Environment(env) => Self::Environment(env.to_string()),
            other => Self::Core(other.into()),
        }
    }
}

impl From<DescriptorError> for CliError {
    fn from(e: DescriptorError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::error::{ConfigError, EnvironmentError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::Core(FaultlineError::Config(ConfigError::FileNotFound {
            path: "faultline.toml".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2, "wrapped config error should return 2");
    }

    #[test]
    fn test_exit_code_environment_error() {
        let err: CliError = GenerationError::Environment(EnvironmentError::VersionProbe {
            binary: "bin/etcd".to_owned(),
            reason: "No such file or directory".to_owned(),
        })
        .into();
        assert!(matches!(err, CliError::Environment(_)));
        assert_eq!(err.exit_code(), 3, "broken environment should return exit code 3");
        assert!(err.to_string().contains("bin/etcd"));
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("unknown scenario".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
        assert_eq!(err.to_string(), "unknown scenario");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1, "json error should return exit code 1");
    }

    #[test]
    fn test_from_duplicate_scenario_is_command_failure() {
        let err: CliError = GenerationError::DuplicateScenario("Issue1".to_owned()).into();
        assert!(matches!(err, CliError::Core(FaultlineError::Scenario(_))));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_from_descriptor_error() {
        let err: CliError = DescriptorError::Invalid {
            field: "election_ms".to_owned(),
            reason: "must be greater than tick_ms".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("election_ms"));
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = err.to_string();
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }
}
