//! Explicit host session: context, events, and effects.
//!
//! A host (the CLI watcher, the MCP server, an editor plugin) feeds events
//! into a [`Session`] and performs the [`Effect`]s it returns. All state lives
//! in the session's [`Context`]; nothing is process-global.
//!
//! ```ignore
//! let (mut session, effects) = Session::init(config, root);
//! host.perform(effects);
//! host.perform(session.dispatch(Event::DocumentChanged(doc), Instant::now()));
//! host.perform(session.tick(Instant::now()));
//! ```

mod handlers;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

pub use handlers::{
    ActiveDocumentHandler, CommandHandler, DocumentChangedHandler, Handle, Handler,
    HandlerRegistry,
};

use crate::{
    config::Config,
    core::{
        Annotation, Corpus, CorpusStore, DecorationCache, Debouncer, Document, RegexScanner,
        RewritePlan, Scanner, SkippedLiteral, render,
    },
};

/// Commands a host can invoke by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Reserved placeholder; does nothing.
    Translate,
    /// Rewrite literal calls in the active document.
    Rewrite,
}

#[derive(Debug, Clone)]
pub enum Event {
    DocumentChanged(Document),
    ActiveDocumentChanged(Option<Document>),
    CommandInvoked(CommandId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DocumentChanged,
    ActiveDocumentChanged,
    CommandInvoked,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::DocumentChanged(_) => EventKind::DocumentChanged,
            Event::ActiveDocumentChanged(_) => EventKind::ActiveDocumentChanged,
            Event::CommandInvoked(_) => EventKind::CommandInvoked,
        }
    }
}

/// Side effects for the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowError(String),
    ShowInfo(String),
    /// Replace the document's whole annotation set.
    SetAnnotations {
        path: PathBuf,
        annotations: Vec<Annotation>,
    },
    /// Apply every edit of the plan as one edit, or none of them.
    ApplyEdit { path: PathBuf, plan: RewritePlan },
    /// Literal calls a rewrite left alone because the corpus has no entry
    /// for them. Only sent when there was nothing to rewrite; otherwise
    /// they travel in the [`Effect::ApplyEdit`] plan.
    SkippedLiterals {
        path: PathBuf,
        skipped: Vec<SkippedLiteral>,
    },
}

/// Everything a session's handlers read and update.
pub struct Context {
    pub config: Config,
    pub store: CorpusStore,
    pub cache: DecorationCache,
    pub scanner: Box<dyn Scanner>,
    pub active: Option<Document>,
    pub annotations: Vec<Annotation>,
    pub debouncer: Debouncer<()>,
}

impl Context {
    pub fn new(config: Config, store: CorpusStore) -> Self {
        let debouncer = Debouncer::new(config.debounce());
        Self {
            config,
            store,
            cache: DecorationCache::new(),
            scanner: Box::new(RegexScanner),
            active: None,
            annotations: Vec::new(),
            debouncer,
        }
    }
}

/// Event subscriptions held for the session's lifetime and released together.
struct Subscriptions {
    registry: HandlerRegistry,
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        log::debug!("Releasing {} event subscription(s)", self.registry.len());
    }
}

pub struct Session {
    ctx: Context,
    subscriptions: Option<Subscriptions>,
}

impl Session {
    /// Activate a session for the project at `root`.
    ///
    /// A disabled config yields an inert session. A corpus that cannot be read
    /// is reported once as a [`Effect::ShowError`]; the session keeps running
    /// without annotations or rewrites.
    pub fn init(config: Config, root: &Path) -> (Self, Vec<Effect>) {
        let corpus_path = config.corpus_path(root);
        if !config.enable {
            log::info!("vvtrans is disabled by configuration");
            let ctx = Context::new(config, CorpusStore::empty(corpus_path));
            return (
                Self {
                    ctx,
                    subscriptions: None,
                },
                Vec::new(),
            );
        }

        let (store, err) = CorpusStore::open(corpus_path);
        let mut effects = Vec::new();
        if let Some(err) = err {
            log::warn!("{}", err);
            effects.push(Effect::ShowError(format!(
                "{}. Please reconfigure the corpus location.",
                err
            )));
        }
        (Self::enabled(config, store), effects)
    }

    /// An enabled session over an already loaded corpus.
    pub fn with_corpus(config: Config, corpus_path: impl Into<PathBuf>, corpus: Corpus) -> Self {
        Self::enabled(config, CorpusStore::with_corpus(corpus_path, corpus))
    }

    fn enabled(config: Config, store: CorpusStore) -> Self {
        Self {
            ctx: Context::new(config, store),
            subscriptions: Some(Subscriptions {
                registry: HandlerRegistry::standard(),
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscriptions.is_some()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.ctx.annotations
    }

    /// Route an event to its handler.
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        let Some(subscriptions) = &self.subscriptions else {
            return Vec::new();
        };
        match subscriptions.registry.get(event.kind()) {
            Some(handler) => handler.handle(&event, &mut self.ctx, now),
            None => Vec::new(),
        }
    }

    /// Make `document` active and annotate it immediately, without debouncing.
    pub fn open(&mut self, document: Document, now: Instant) -> Vec<Effect> {
        let mut effects = self.dispatch(Event::ActiveDocumentChanged(Some(document)), now);
        if self.ctx.debouncer.cancel().is_some() {
            effects.extend(self.refresh_now());
        }
        effects
    }

    /// When a debounced refresh is waiting, the instant it becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ctx.debouncer.deadline()
    }

    /// Run the debounced refresh if it is due.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        match self.ctx.debouncer.poll(now) {
            Some(()) => self.refresh_now(),
            None => Vec::new(),
        }
    }

    /// Recompute the active document's annotations.
    pub fn refresh_now(&mut self) -> Vec<Effect> {
        if self.subscriptions.is_none() {
            return Vec::new();
        }
        let ctx = &mut self.ctx;
        let (Some(document), Some(corpus)) = (ctx.active.as_ref(), ctx.store.corpus()) else {
            return Vec::new();
        };

        let annotations = render(
            document,
            corpus,
            &ctx.config.trans_style,
            &mut ctx.cache,
            ctx.scanner.as_ref(),
        );
        ctx.annotations = annotations.clone();
        vec![Effect::SetAnnotations {
            path: document.path().to_path_buf(),
            annotations,
        }]
    }

    /// Re-read the corpus file. The decoration cache is cleared with it.
    pub fn reload_corpus(&mut self) -> Vec<Effect> {
        if self.subscriptions.is_none() {
            return Vec::new();
        }
        self.ctx.cache.clear();
        match self.ctx.store.reload() {
            Ok(()) => self.refresh_now(),
            Err(err) => {
                log::warn!("{}", err);
                vec![Effect::ShowError(err.to_string())]
            }
        }
    }

    /// Release every subscription. Later events are ignored.
    pub fn shutdown(&mut self) {
        self.ctx.debouncer.cancel();
        self.subscriptions = None;
    }
}
