//! CLI route: the command registrar. Builds the command tree, matches argv to a
//! unit, runs its pipeline, prints the outcome and returns the exit status.

use crate::cli::help::{command_name, render_help_at};
use crate::cli::output::{Console, OutputMode, ResultPrinter};
use crate::cli::parse::{root_command, GlobalArgs};
use crate::command::{CommandUnit, RawInput, Runnable, Stage, StageTracker};
use crate::config::ConfigLoader;
use crate::error::{
    CliError, ConfigError, RegistrarError, RemoteError, UnknownCommandError, EXIT_FAILURE,
    EXIT_SUCCESS,
};
use crate::logging::init_logging;
use crate::session::SessionContext;
use clap::error::ErrorKind;
use clap::{ArgMatches, Command};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, info_span, warn, Instrument};

#[derive(Default)]
struct Node {
    unit: Option<Box<dyn Runnable>>,
    about: &'static str,
    children: BTreeMap<&'static str, Node>,
}

impl Node {
    fn command(&self, name: &'static str) -> Command {
        let mut cmd = Command::new(name).allow_external_subcommands(true);
        match self.unit {
            Some(ref unit) => {
                let spec = unit.describe();
                cmd = cmd
                    .about(spec.short_help)
                    .long_about(spec.long_help)
                    .after_help(format!("Examples:\n{}", spec.example))
                    .args(unit.args());
            }
            None => cmd = cmd.about(self.about),
        }
        for (child_name, child) in &self.children {
            cmd = cmd.subcommand(child.command(*child_name));
        }
        cmd
    }
}

/// Where an argv path landed in the tree.
struct Resolved<'a> {
    path: Vec<String>,
    unit: &'a dyn Runnable,
    matches: &'a ArgMatches,
}

/// Tree of command units keyed by unique names per level.
#[derive(Default)]
pub struct Registrar {
    root: Node,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `unit` under the node at `parent` (empty for the root).
    pub fn register<U: CommandUnit + 'static>(
        &mut self,
        unit: U,
        parent: &[&str],
    ) -> Result<(), RegistrarError> {
        let name = unit.spec().name;
        let node = Node {
            unit: Some(Box::new(unit)),
            ..Node::default()
        };
        self.insert(name, node, parent)
    }

    /// Add a grouping node with no unit of its own.
    pub fn group(
        &mut self,
        name: &'static str,
        about: &'static str,
        parent: &[&str],
    ) -> Result<(), RegistrarError> {
        let node = Node {
            about,
            ..Node::default()
        };
        self.insert(name, node, parent)
    }

    fn insert(
        &mut self,
        name: &'static str,
        node: Node,
        parent: &[&str],
    ) -> Result<(), RegistrarError> {
        let mut current = &mut self.root;
        for segment in parent {
            current = current
                .children
                .get_mut(*segment)
                .ok_or_else(|| RegistrarError::UnknownParent(parent.join(" ")))?;
        }
        if current.children.contains_key(name) {
            let mut path: Vec<&str> = parent.to_vec();
            path.push(name);
            return Err(RegistrarError::DuplicateName(path.join(" ")));
        }
        current.children.insert(name, node);
        Ok(())
    }

    /// The clap command tree with global flags attached.
    pub fn command(&self) -> Command {
        let mut root = root_command();
        for (name, child) in &self.root.children {
            root = root.subcommand(child.command(*name));
        }
        root
    }

    /// Longest-prefix walk of the matched subcommands.
    fn resolve<'a>(
        &'a self,
        command: &mut Command,
        matches: &'a ArgMatches,
    ) -> Result<Resolved<'a>, UnknownCommandError> {
        let mut node = &self.root;
        let mut current = matches;
        let mut path: Vec<String> = Vec::new();
        let mut known = 0;

        while let Some((name, sub)) = current.subcommand() {
            path.push(name.to_string());
            match node.children.get(name) {
                Some(child) => {
                    node = child;
                    current = sub;
                    known += 1;
                }
                None => break,
            }
        }

        match node.unit {
            Some(ref unit) if known == path.len() => Ok(Resolved {
                path,
                unit: unit.as_ref(),
                matches: current,
            }),
            _ => Err(UnknownCommandError {
                path: path.join(" "),
                help: render_help_at(command, &path[..known]),
            }),
        }
    }

    /// Run argv against the tree on the standard streams.
    pub fn dispatch<I, T>(&self, argv: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut console = Console::stdio();
        self.dispatch_with(argv, bootstrap_session, &mut console)
    }

    /// Run argv against the tree. `session_for` builds the session once the
    /// global flags are known, before the path is resolved, so the configured
    /// output mode and logging apply to unknown-command errors too. All output
    /// goes to `console`.
    pub fn dispatch_with<I, T, F, O, E>(
        &self,
        argv: I,
        session_for: F,
        console: &mut Console<O, E>,
    ) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&GlobalArgs) -> Result<SessionContext, ConfigError>,
        O: Write,
        E: Write,
    {
        let mut command = self.command();
        let matches = match command.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(e) => return report_parse_error(&e, console),
        };
        let globals = match GlobalArgs::from_matches(&matches) {
            Ok(globals) => globals,
            Err(e) => return report_parse_error(&e, console),
        };
        if matches.subcommand().is_none() {
            let help = command.render_help().to_string();
            if let Err(e) = console.write_out(&help) {
                warn!(error = %e, "Failed to write help text");
            }
            return EXIT_SUCCESS;
        }

        let ctx = match session_for(&globals) {
            Ok(ctx) => ctx,
            Err(e) => {
                let requested = OutputMode::resolve(globals.output.as_deref(), OutputMode::Human)
                    .unwrap_or_default();
                return report_error(requested, CliError::from(e), console);
            }
        };
        let requested = OutputMode::resolve(globals.output.as_deref(), ctx.output_mode())
            .unwrap_or(ctx.output_mode());

        let resolved = match self.resolve(&mut command, &matches) {
            Ok(resolved) => resolved,
            Err(unknown) => {
                debug!(path = %unknown.path, "No command registered at path");
                let help = unknown.help.clone();
                let code = report_error(requested, CliError::from(unknown), console);
                if !requested.is_machine_readable() {
                    if let Err(e) = console.write_err(&help) {
                        warn!(error = %e, "Failed to write help text");
                    }
                }
                return code;
            }
        };

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                let error = RemoteError::new("Failed to start async runtime", e);
                return report_error(requested, CliError::from(error), console);
            }
        };

        let raw = RawInput::new(
            resolved.path.clone(),
            resolved.matches.clone(),
            globals.output.clone(),
        );
        let span = info_span!("command", name = %command_name(&resolved.path));
        let mut stages = StageTracker::new();
        let execution =
            runtime.block_on(resolved.unit.run(&ctx, &raw, &mut stages).instrument(span));

        let displayed =
            ResultPrinter::new(execution.output, console).display(execution.outcome.as_ref());
        if stages.current() == Stage::Executed {
            stages.advance(Stage::Displayed);
            stages.advance(Stage::Terminated);
        }
        match displayed {
            Ok(()) => execution.exit_code(),
            Err(e) => {
                warn!(error = %e, "Failed to write command output");
                EXIT_FAILURE
            }
        }
    }
}

/// Load configuration, install logging, and build the session context.
pub fn bootstrap_session(globals: &GlobalArgs) -> Result<SessionContext, ConfigError> {
    let config = ConfigLoader::load_with(globals.config.as_deref())?;
    init_logging(&globals.logging_config(config.logging.clone()))?;
    SessionContext::new(&config)
}

fn report_error<O: Write, E: Write>(
    mode: OutputMode,
    error: CliError,
    console: &mut Console<O, E>,
) -> i32 {
    if let Err(e) = ResultPrinter::new(mode, console).render_error(&error) {
        warn!(error = %e, "Failed to write error output");
    }
    error.exit_code()
}

/// `--help` and `--version` are successes printed to stdout; any other parse
/// failure prints clap's usage message to stderr.
fn report_parse_error<O: Write, E: Write>(error: &clap::Error, console: &mut Console<O, E>) -> i32 {
    let rendered = error.render().to_string();
    let (written, code) = match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            (console.write_out(&rendered), EXIT_SUCCESS)
        }
        _ => (console.write_err(&rendered), EXIT_FAILURE),
    };
    if let Err(e) = written {
        warn!(error = %e, "Failed to write usage output");
    }
    code
}
