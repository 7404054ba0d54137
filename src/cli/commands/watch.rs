//! Watch command - re-annotate a file whenever it or the corpus changes.
//!
//! File-system notifications are forwarded into a single-threaded tokio loop.
//! Document changes go through the session's debouncer, so a burst of saves
//! produces one refresh once the file has been quiet for `debounceMs`.
//! Corpus changes are coalesced the same way before the corpus is reloaded.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{RecursiveMode, Watcher as _};
use tokio::sync::mpsc;

use super::super::{args::WatchCommand, exit_status::ExitStatus};
use super::annotate::print_annotation_effects;
use super::helper::{Setup, Workspace, prepare};
use crate::{
    core::{Document, debounce, debounce::sleep_until},
    session::{Effect, Event},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Document,
    Corpus,
}

pub fn watch(cmd: WatchCommand) -> Result<ExitStatus> {
    let workspace = match prepare(&cmd.common)? {
        Setup::Ready(workspace) => workspace,
        Setup::Exit(status) => return Ok(status),
    };

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(WatchState::new(*workspace)))
}

/// The session side of the watch loop: what happens on each kind of wake-up.
struct WatchState {
    workspace: Workspace,
}

impl WatchState {
    fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Annotate the document as it is now.
    fn start(&mut self, now: Instant) -> Vec<Effect> {
        let document = self.workspace.document.clone();
        self.workspace.session.open(document, now)
    }

    /// Re-read the document and schedule a debounced refresh.
    fn document_changed(&mut self, now: Instant) -> Vec<Effect> {
        match Document::open(self.workspace.document.path()) {
            Ok(document) => {
                self.workspace.document = document.clone();
                self.workspace
                    .session
                    .dispatch(Event::DocumentChanged(document), now)
            }
            Err(err) => {
                log::warn!("Failed to re-read document: {}", err);
                Vec::new()
            }
        }
    }

    fn reload_corpus(&mut self) -> Vec<Effect> {
        log::info!("Reloading corpus");
        self.workspace.session.reload_corpus()
    }

    fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.workspace.session.tick(now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.workspace.session.next_deadline()
    }

    fn print(&self, effects: &[Effect]) {
        if effects.is_empty() {
            return;
        }
        println!();
        print_annotation_effects(&self.workspace, effects);
    }
}

async fn run(mut state: WatchState) -> Result<ExitStatus> {
    let workspace = &state.workspace;
    let document_path = canonical(workspace.document.path())?;
    let corpus_path = workspace.config.corpus_path(&workspace.root);
    let corpus_path = canonical(&corpus_path).unwrap_or(corpus_path);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watched = [
        (document_path, Change::Document),
        (corpus_path, Change::Corpus),
    ];
    let filter = watched.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let event = match res {
            Ok(event) => event,
            Err(err) => {
                log::warn!("File watch error: {}", err);
                return;
            }
        };
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return;
        }
        for (path, change) in &filter {
            if event.paths.iter().any(|p| p == path) && tx.send(*change).is_err() {
                log::debug!("Watch loop has stopped; dropping {:?} change", change);
            }
        }
    })
    .context("Failed to start file watcher")?;

    for dir in watched.iter().filter_map(|(path, _)| path.parent()) {
        if let Err(err) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::warn!("Cannot watch {}: {}", dir.display(), err);
        }
    }

    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel();
    let corpus_reload = debounce(state.workspace.config.debounce(), move |()| {
        if reload_tx.send(()).is_err() {
            log::debug!("Watch loop has stopped; corpus reload dropped");
        }
    });

    let effects = state.start(Instant::now());
    print_annotation_effects(&state.workspace, &effects);
    println!(
        "{} {} (Ctrl-C to stop)",
        "Watching".cyan().bold(),
        state.workspace.document.path().display()
    );

    loop {
        tokio::select! {
            Some(change) = rx.recv() => match change {
                Change::Document => {
                    let effects = state.document_changed(Instant::now());
                    state.print(&effects);
                }
                Change::Corpus => corpus_reload.trigger(()),
            },
            Some(()) = reload_rx.recv() => {
                let effects = state.reload_corpus();
                state.print(&effects);
            }
            _ = sleep_until(state.next_deadline()) => {
                let effects = state.tick(Instant::now());
                state.print(&effects);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    state.workspace.session.shutdown();
    Ok(ExitStatus::Success)
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))
}
