//! Command-line host.
//!
//! Each command opens one document, drives a [`crate::session::Session`]
//! over it, and prints the resulting effects.

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;

pub use args::{AnnotateCommand, Arguments, Command, CommonArgs, RewriteCommand, WatchCommand};
pub use exit_status::ExitStatus;

use commands::{annotate::annotate, init::init, rewrite::rewrite, translate::translate, watch::watch};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Annotate(cmd)) => annotate(cmd),
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Watch(cmd)) => watch(cmd),
        Some(Command::Translate) => translate(),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run_cli()
            anyhow::bail!("Serve command should be handled before run_cli()")
        }
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
