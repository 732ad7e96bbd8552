//! CLI parse: global flags and the root clap command. No behavior; definitions only.

use crate::logging::LoggingConfig;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use std::path::PathBuf;

// Flags accepted at every level of the command tree. Plain comment: a doc
// comment here would replace the root `about` when augmented.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Output format (human, json, yaml); defaults to the configured output
    #[arg(long, short = 'o', global = true, value_name = "MODE")]
    pub output: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        Self::from_arg_matches(matches)
    }

    /// Fold the logging flags over the configured logging settings.
    /// Explicit flags win over `--verbose`, which wins over the config file.
    pub fn logging_config(&self, base: LoggingConfig) -> LoggingConfig {
        if self.quiet {
            return LoggingConfig {
                enabled: false,
                ..base
            };
        }

        let mut config = base;
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(ref level) = self.log_level {
            config.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.output = output.clone();
        }
        if let Some(ref file) = self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

/// Root `stratus` command carrying the global flags.
pub fn root_command() -> Command {
    let root = Command::new("stratus")
        .version(env!("CARGO_PKG_VERSION"))
        .allow_external_subcommands(true);
    GlobalArgs::augment_args(root).about("Command-line client for the cloud provider API")
}
