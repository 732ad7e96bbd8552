//! CLI output: output modes and the result printer.
//!
//! The printer is the terminal sink of every invocation. It renders a success
//! value through the `Renderable` capability, or an error, and never decides
//! the exit status.

use crate::cli::presentation::Renderable;
use crate::error::{CliError, ValidationError};
use owo_colors::OwoColorize;
use serde_json::json;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
    Yaml,
}

impl OutputMode {
    /// Returns true if the output is intended for machine consumption
    pub fn is_machine_readable(&self) -> bool {
        match self {
            OutputMode::Human => false,
            OutputMode::Json | OutputMode::Yaml => true,
        }
    }

    /// Resolve the `--output` flag against the session default.
    pub fn resolve(flag: Option<&str>, default: OutputMode) -> Result<OutputMode, ValidationError> {
        match flag {
            None => Ok(default),
            Some(value) => value
                .parse()
                .map_err(|reason: String| ValidationError::new("output", reason)),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            "yaml" | "yml" => Ok(OutputMode::Yaml),
            other => Err(format!(
                "unknown output mode '{}' (expected human, json, or yaml)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputMode::Human => "human",
            OutputMode::Json => "json",
            OutputMode::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

/// The process output streams: results go to `out`, errors and help to `err`.
pub struct Console<O, E> {
    out: O,
    err: E,
    color: bool,
}

impl Console<io::Stdout, io::Stderr> {
    /// Standard streams; errors are colored when stderr is a terminal.
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
            color: io::stderr().is_terminal(),
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn out(&self) -> &O {
        &self.out
    }

    pub fn err(&self) -> &E {
        &self.err
    }

    pub(crate) fn write_out(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.trim_end_matches('\n'))?;
        self.out.flush()
    }

    pub(crate) fn write_err(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{}", text.trim_end_matches('\n'))?;
        self.err.flush()
    }
}

/// Renders outcomes in one output mode onto a console.
pub struct ResultPrinter<'a, O, E> {
    mode: OutputMode,
    console: &'a mut Console<O, E>,
}

impl<'a, O: Write, E: Write> ResultPrinter<'a, O, E> {
    pub fn new(mode: OutputMode, console: &'a mut Console<O, E>) -> Self {
        Self { mode, console }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Render a success value to the output stream, or an error to the error stream.
    pub fn display<R: Renderable + ?Sized>(
        &mut self,
        outcome: Result<&R, &CliError>,
    ) -> io::Result<()> {
        match outcome {
            Ok(value) => self.render_value(value),
            Err(error) => self.render_error(error),
        }
    }

    fn render_value<R: Renderable + ?Sized>(&mut self, value: &R) -> io::Result<()> {
        let text = match self.mode {
            OutputMode::Human => value.render_human(),
            OutputMode::Json => serde_json::to_string_pretty(&value.render_structured())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            OutputMode::Yaml => serde_yaml::to_string(&value.render_structured())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        };
        self.console.write_out(&text)
    }

    pub fn render_error(&mut self, error: &CliError) -> io::Result<()> {
        let text = match self.mode {
            OutputMode::Human => {
                let prefix = if self.console.color {
                    "Error:".red().bold().to_string()
                } else {
                    "Error:".to_string()
                };
                format!("{} {}", prefix, error)
            }
            OutputMode::Json => serde_json::to_string_pretty(&error_body(error))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            OutputMode::Yaml => serde_yaml::to_string(&error_body(error))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        };
        self.console.write_err(&text)
    }
}

fn error_body(error: &CliError) -> serde_json::Value {
    json!({
        "error": {
            "kind": error.kind(),
            "message": error.to_string(),
            "exit_code": error.exit_code(),
        }
    })
}
