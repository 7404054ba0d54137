//! Translate command - reserved placeholder.
//!
//! Needs neither a document nor a corpus; it only tells the user where the
//! working conversion lives.

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;

pub fn translate() -> Result<ExitStatus> {
    println!(
        "{} translate is reserved and has no effect; use {} to convert literal calls.",
        "note:".bold(),
        "vvtrans rewrite".cyan()
    );
    Ok(ExitStatus::Success)
}
