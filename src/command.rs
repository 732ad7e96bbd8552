//! Command units: the auth-gate, validate, execute, display pipeline.
//!
//! A `CommandUnit` describes one named operation. Every unit runs through the
//! same scaffold (`Runnable::run`), which enforces the stage order:
//!
//! ```text
//! Idle -> AuthChecked -> Validated -> Executed -> Displayed -> Terminated
//! ```
//!
//! An auth or validation failure jumps straight to `Terminated` without touching
//! the remote client. Units are built once when the tree is assembled and hold no
//! per-invocation state; options are rebuilt from raw input on every run.

mod account;
mod regions;

pub use account::{AccountCommand, BandwidthCommand};
pub use regions::{RegionListCommand, RegionListOptions};

use crate::cli::{OutputMode, Registrar, Resource};
use crate::error::{AuthError, CliError, RegistrarError, RemoteError, ValidationError};
use crate::session::SessionContext;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::fmt;
use tracing::{debug, info};

/// Static description of a command unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub short_help: &'static str,
    pub long_help: &'static str,
    pub example: &'static str,
    pub requires_auth: bool,
}

/// Arguments of one invocation, as matched for the selected unit.
#[derive(Debug, Clone)]
pub struct RawInput {
    path: Vec<String>,
    matches: ArgMatches,
    output: Option<String>,
}

impl RawInput {
    pub fn new(path: Vec<String>, matches: ArgMatches, output: Option<String>) -> Self {
        Self {
            path,
            matches,
            output,
        }
    }

    /// Match `args` (no program name) against a single unit's arguments.
    pub fn parse<U, I, T>(unit: &U, args: I) -> Result<Self, clap::Error>
    where
        U: CommandUnit,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let spec = unit.spec();
        let matches = Command::new(spec.name)
            .no_binary_name(true)
            .args(unit.arguments())
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_name("MODE"),
            )
            .try_get_matches_from(args)?;
        let output = matches.get_one::<String>("output").cloned();
        Ok(Self::new(vec![spec.name.to_string()], matches, output))
    }

    /// Command path, e.g. `["regions", "list"]`.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// Raw `--output` value, if given.
    pub fn output_flag(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// A string argument, or `None` when absent.
    pub fn string(&self, id: &str) -> Result<Option<&str>, ValidationError> {
        self.matches
            .try_get_one::<String>(id)
            .map(|value| value.map(String::as_str))
            .map_err(|e| ValidationError::new(id, e.to_string()))
    }
}

/// One named operation: declared auth requirement, validation, exactly one
/// remote call.
#[async_trait]
pub trait CommandUnit: Send + Sync {
    /// Per-invocation option state
    type Options: fmt::Debug + PartialEq + Send + Sync;

    fn spec(&self) -> &CommandSpec;

    /// Unit-specific clap arguments.
    fn arguments(&self) -> Vec<Arg> {
        Vec::new()
    }

    /// Runs before any option parsing or execution.
    fn auth_gate(&self, ctx: &SessionContext) -> Result<(), AuthError> {
        if self.spec().requires_auth && !ctx.is_authenticated() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }

    /// Pure and deterministic: the same raw input always yields the same options.
    fn validate(&self, raw: &RawInput) -> Result<Self::Options, ValidationError>;

    /// Exactly one call against `ctx.client()`.
    async fn execute(
        &self,
        ctx: &SessionContext,
        options: &Self::Options,
    ) -> Result<Resource, RemoteError>;
}

/// Pipeline stage of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    AuthChecked,
    Validated,
    Executed,
    Displayed,
    Terminated,
}

/// Records stage transitions; only forward moves are legal.
#[derive(Debug, Clone)]
pub struct StageTracker {
    history: Vec<Stage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            history: vec![Stage::Idle],
        }
    }

    pub fn current(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Idle)
    }

    pub fn advance(&mut self, next: Stage) {
        let current = self.current();
        debug_assert!(
            next > current,
            "illegal stage transition {:?} -> {:?}",
            current,
            next
        );
        debug!(from = ?current, to = ?next, "Stage transition");
        self.history.push(next);
    }

    pub fn history(&self) -> &[Stage] {
        &self.history
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// What a unit run hands to the printer: the mode to render in and the outcome.
#[derive(Debug)]
pub struct Execution {
    pub output: OutputMode,
    pub outcome: Result<Resource, CliError>,
}

impl Execution {
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Ok(_) => crate::error::EXIT_SUCCESS,
            Err(ref e) => e.exit_code(),
        }
    }
}

/// Object-safe face of a command unit, as stored in the registrar.
#[async_trait]
pub trait Runnable: Send + Sync {
    fn describe(&self) -> &CommandSpec;

    fn args(&self) -> Vec<Arg>;

    /// Gate, validate and execute. Leaves `stages` at `Executed` on a completed
    /// call (successful or not) or at `Terminated` when the call never happened.
    async fn run(
        &self,
        ctx: &SessionContext,
        raw: &RawInput,
        stages: &mut StageTracker,
    ) -> Execution;
}

#[async_trait]
impl<U: CommandUnit> Runnable for U {
    fn describe(&self) -> &CommandSpec {
        self.spec()
    }

    fn args(&self) -> Vec<Arg> {
        self.arguments()
    }

    async fn run(
        &self,
        ctx: &SessionContext,
        raw: &RawInput,
        stages: &mut StageTracker,
    ) -> Execution {
        let name = self.spec().name;
        // Errors before validation still honor a well-formed --output flag
        let fallback = OutputMode::resolve(raw.output_flag(), ctx.output_mode())
            .unwrap_or_else(|_| ctx.output_mode());

        if let Err(e) = self.auth_gate(ctx) {
            info!(command = name, "Command requires authentication");
            stages.advance(Stage::Terminated);
            return Execution {
                output: fallback,
                outcome: Err(e.into()),
            };
        }
        stages.advance(Stage::AuthChecked);

        let validated = OutputMode::resolve(raw.output_flag(), ctx.output_mode())
            .and_then(|output| self.validate(raw).map(|options| (output, options)));
        let (output, options) = match validated {
            Ok(validated) => validated,
            Err(e) => {
                info!(command = name, field = %e.field, "Validation failed");
                stages.advance(Stage::Terminated);
                return Execution {
                    output: fallback,
                    outcome: Err(e.into()),
                };
            }
        };
        stages.advance(Stage::Validated);
        debug!(command = name, ?options, %output, "Options validated");

        info!(command = name, "Calling remote service");
        let outcome = self.execute(ctx, &options).await.map_err(|e| {
            info!(command = name, error = %e, "Remote call failed");
            CliError::from(e)
        });
        stages.advance(Stage::Executed);

        Execution { output, outcome }
    }
}

/// The full stratus command tree.
pub fn command_tree() -> Result<Registrar, RegistrarError> {
    let mut registrar = Registrar::new();
    registrar.register(AccountCommand, &[])?;
    registrar.register(BandwidthCommand, &["account"])?;
    registrar.group("regions", "Datacenter regions", &[])?;
    registrar.register(RegionListCommand, &["regions"])?;
    Ok(registrar)
}
