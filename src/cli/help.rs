//! CLI help and command-name contract for logging and routing.

use clap::Command;

/// Command name for spans and logs (e.g. "account.bandwidth", "regions.list").
pub fn command_name<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return "root".to_string();
    }
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join(".")
}

/// Help text of the deepest node of `cmd` along `path`.
pub fn render_help_at<S: AsRef<str>>(cmd: &mut Command, path: &[S]) -> String {
    match path.split_first() {
        None => cmd.render_help().to_string(),
        Some((head, rest)) => match cmd.find_subcommand_mut(head.as_ref()) {
            Some(sub) => render_help_at(sub, rest),
            None => cmd.render_help().to_string(),
        },
    }
}
