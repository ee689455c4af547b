//! Configuration for the gotest-report command
//!
//! This module provides the command-line configuration: input and output
//! locations and logging options.

use std::path::PathBuf;

use clap::Parser;

/// Default report file, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "test-report.md";

/// gotest-report - Markdown reports from `go test -json` output
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gotest-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// `go test -json` output file
    ///
    /// Reads from stdin when not given.
    #[arg(short, long, env = "GOTEST_REPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// Output markdown file
    ///
    /// Defaults to test-report.md in the current directory.
    #[arg(short, long, env = "GOTEST_REPORT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the report path, using the default if not specified
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the input path is specified but doesn't exist or
    /// is not a regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_output_path_default() {
        let config = Config::default();
        assert_eq!(config.output_path(), PathBuf::from("test-report.md"));
    }

    #[test]
    fn test_output_path_custom() {
        let custom = PathBuf::from("/custom/report.md");
        let config = Config {
            output: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.output_path(), custom);
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose_wins() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_without_input() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.json")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
