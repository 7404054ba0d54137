use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use tempfile::NamedTempFile;

use super::super::{args::CommonArgs, exit_status::ExitStatus, report};
use crate::{
    config::{Config, load_config},
    core::Document,
    session::{Effect, Session},
};

/// A session with the requested document loaded and ready for commands.
pub struct Workspace {
    pub session: Session,
    pub document: Document,
    pub config: Config,
    pub root: PathBuf,
}

pub enum Setup {
    Ready(Box<Workspace>),
    /// Nothing to do; exit with this status.
    Exit(ExitStatus),
}

/// Load config, the corpus, and the document named in `args`.
pub fn prepare(args: &CommonArgs) -> Result<Setup> {
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let loaded = load_config(&cwd)?;
    let mut config = loaded.config;
    if let Some(corpus) = &args.corpus {
        config.corpus_directory = absolute(&cwd, corpus).to_string_lossy().to_string();
    }

    if !config.enable {
        println!(
            "{} vvtrans is disabled by {}",
            "note:".bold(),
            crate::config::CONFIG_FILE_NAME
        );
        return Ok(Setup::Exit(ExitStatus::Success));
    }

    let document = Document::open_supported(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let (session, effects) = Session::init(config.clone(), &loaded.root);
    let failed = effects
        .iter()
        .any(|effect| matches!(effect, Effect::ShowError(_)));
    for effect in &effects {
        report::print_message(effect);
    }
    if failed {
        return Ok(Setup::Exit(ExitStatus::Error));
    }

    if args.verbose {
        eprintln!(
            "Using corpus {}",
            config.corpus_path(&loaded.root).display()
        );
    }

    Ok(Setup::Ready(Box::new(Workspace {
        session,
        document,
        config,
        root: loaded.root,
    })))
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Replace the file's contents in one step: write a sibling temp file, then rename.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if let Ok(metadata) = fs::metadata(path)
        && let Err(err) = fs::set_permissions(temp.path(), metadata.permissions())
    {
        log::warn!("Failed to keep permissions of {}: {}", path.display(), err);
    }
    temp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
