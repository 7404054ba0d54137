//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `annotate`: Show the translation next to every key reference in a file
//! - `rewrite`: Convert literal `t("...")` calls into key-based calls
//! - `watch`: Re-annotate a file whenever it changes
//! - `translate`: Reserved placeholder, does nothing
//! - `init`: Initialize vvtrans configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by the document commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source file to work on (.js, .jsx, .ts, .tsx, .html)
    pub file: PathBuf,

    /// Corpus file path (overrides config file)
    #[arg(long, env = "VVTRANS_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnnotateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite the file (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the corpus text next to every t("LMID_xxxxxxxx") reference
    Annotate(AnnotateCommand),
    /// Replace t("text") calls with key-based calls, keeping the text as a comment
    Rewrite(RewriteCommand),
    /// Re-annotate a file each time it (or the corpus) changes
    Watch(WatchCommand),
    /// Reserved for a future translation action; currently does nothing
    Translate,
    /// Initialize a new .vvtransrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
