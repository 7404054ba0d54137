//! Event handlers and the registry that routes events to them.
//!
//! A handler turns an event into context updates plus a list of effects for
//! the host to perform. Handlers never talk to the host directly.

use std::{collections::HashMap, time::Instant};

use enum_dispatch::enum_dispatch;

use super::{CommandId, Context, Effect, Event, EventKind};
use crate::{
    core::{Document, plan_rewrite},
    error::Error,
};

#[enum_dispatch]
pub trait Handle {
    fn handle(&self, event: &Event, ctx: &mut Context, now: Instant) -> Vec<Effect>;
}

#[enum_dispatch(Handle)]
#[derive(Debug, Clone, Copy)]
pub enum Handler {
    DocumentChanged(DocumentChangedHandler),
    ActiveDocumentChanged(ActiveDocumentHandler),
    Command(CommandHandler),
}

/// Schedules a refresh when the active document is edited.
///
/// Changes to any other document leave the active one untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentChangedHandler;

impl Handle for DocumentChangedHandler {
    fn handle(&self, event: &Event, ctx: &mut Context, now: Instant) -> Vec<Effect> {
        let Event::DocumentChanged(document) = event else {
            return Vec::new();
        };
        let is_active = ctx
            .active
            .as_ref()
            .is_some_and(|active| active.path() == document.path());
        if !is_active || !document.is_supported() {
            log::trace!("Ignoring change in {}", document.path().display());
            return Vec::new();
        }
        ctx.active = Some(document.clone());
        ctx.debouncer.trigger((), now);
        Vec::new()
    }
}

/// Follows the active document and bounds the decoration cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveDocumentHandler;

impl Handle for ActiveDocumentHandler {
    fn handle(&self, event: &Event, ctx: &mut Context, now: Instant) -> Vec<Effect> {
        let Event::ActiveDocumentChanged(document) = event else {
            return Vec::new();
        };
        match document {
            Some(document) if document.is_supported() => {
                log::debug!("Active document: {}", document.path().display());
                ctx.active = Some(document.clone());
                ctx.annotations.clear();
                ctx.debouncer.trigger((), now);
                ctx.cache.maybe_flush();
            }
            Some(document) => {
                log::debug!(
                    "Active document {} is not supported; nothing is active",
                    document.path().display()
                );
                clear_active(ctx);
            }
            None => clear_active(ctx),
        }
        Vec::new()
    }
}

fn clear_active(ctx: &mut Context) {
    ctx.active = None;
    ctx.annotations.clear();
    ctx.debouncer.cancel();
}

/// Runs the named commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandHandler;

impl Handle for CommandHandler {
    fn handle(&self, event: &Event, ctx: &mut Context, _now: Instant) -> Vec<Effect> {
        let Event::CommandInvoked(command) = event else {
            return Vec::new();
        };
        match command {
            CommandId::Translate => Vec::new(),
            CommandId::Rewrite => rewrite_active(ctx),
        }
    }
}

fn rewrite_active(ctx: &mut Context) -> Vec<Effect> {
    let Some(document) = ctx.active.as_ref() else {
        return vec![Effect::ShowError(Error::NoActiveDocument.to_string())];
    };
    let Some(corpus) = ctx.store.corpus() else {
        log::debug!("Rewrite skipped: no corpus loaded");
        return Vec::new();
    };

    let plan = plan_rewrite(document, corpus.reverse(), ctx.scanner.as_ref());
    if plan.is_empty() {
        let mut effects = vec![Effect::ShowInfo(no_rewrite_message(
            document,
            plan.skipped.len(),
        ))];
        if !plan.skipped.is_empty() {
            effects.push(Effect::SkippedLiterals {
                path: document.path().to_path_buf(),
                skipped: plan.skipped,
            });
        }
        return effects;
    }
    vec![Effect::ApplyEdit {
        path: document.path().to_path_buf(),
        plan,
    }]
}

fn no_rewrite_message(document: &Document, unmapped: usize) -> String {
    if unmapped == 0 {
        format!("No literal translation calls in {}", document.path().display())
    } else {
        format!(
            "No corpus entries for the {} literal call(s) in {}",
            unmapped,
            document.path().display()
        )
    }
}

/// Event kind → handler subscriptions.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The subscriptions an enabled session starts with.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(EventKind::DocumentChanged, DocumentChangedHandler.into());
        registry.register(EventKind::ActiveDocumentChanged, ActiveDocumentHandler.into());
        registry.register(EventKind::CommandInvoked, CommandHandler.into());
        registry
    }

    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: EventKind) -> Option<&Handler> {
        self.handlers.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
