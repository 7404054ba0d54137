//! Rewrite command - Convert literal translation calls into key-based calls.
//!
//! `t("Hello")` becomes `t("LMID_00000001") /* Hello */` when the corpus maps
//! `Hello` to `LMID_00000001`. Literals without a corpus entry are left as is.
//!
//! Use `--apply` to actually rewrite the file (default is dry-run mode).

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::RewriteCommand,
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK},
};
use super::helper::{Setup, prepare, write_atomically};
use crate::session::{CommandId, Effect, Event};

pub fn rewrite(cmd: RewriteCommand) -> Result<ExitStatus> {
    let mut workspace = match prepare(&cmd.common)? {
        Setup::Ready(workspace) => workspace,
        Setup::Exit(status) => return Ok(status),
    };

    let now = Instant::now();
    let document = workspace.document.clone();
    workspace.session.open(document.clone(), now);
    let effects = workspace
        .session
        .dispatch(Event::CommandInvoked(CommandId::Rewrite), now);

    let mut status = ExitStatus::Success;
    for effect in effects {
        match effect {
            Effect::ApplyEdit { path, plan } => {
                let count = plan.edits.len();
                if cmd.apply {
                    write_atomically(&path, &plan.apply(document.text()))?;
                    println!(
                        "{} {} {} call(s) in {}.",
                        SUCCESS_MARK.green(),
                        "Rewrote".green().bold(),
                        count,
                        path.display()
                    );
                    if !plan.skipped.is_empty() {
                        println!(
                            "  - skipped: {} literal call(s) without corpus entry",
                            plan.skipped.len()
                        );
                    }
                } else {
                    report::print_rewrite_preview(&document, &plan);
                    println!(
                        "{} {} call(s) in {}.",
                        "Would rewrite".yellow().bold(),
                        count,
                        path.display()
                    );
                    println!("Run with {} to rewrite the file.", "--apply".cyan());
                    status = ExitStatus::Failure;
                }
            }
            Effect::ShowError(_) => {
                report::print_message(&effect);
                status = ExitStatus::Error;
            }
            other => report::print_message(&other),
        }
    }
    Ok(status)
}
