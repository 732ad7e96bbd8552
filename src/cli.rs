//! CLI domain: parse, route, help, output, and presentation only.
//! Command behavior lives in `command`; the registrar dispatches to it.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, render_help_at};
pub use output::{Console, OutputMode, ResultPrinter};
pub use parse::{root_command, GlobalArgs};
pub use presentation::{format_money, format_timestamp, Renderable, Resource};
pub use route::{bootstrap_session, Registrar};
