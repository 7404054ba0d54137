//! Annotate command - show the corpus text for every key reference in a file.

use std::time::Instant;

use anyhow::Result;

use super::super::{
    args::AnnotateCommand,
    exit_status::ExitStatus,
    report,
};
use super::helper::{Setup, Workspace, prepare};
use crate::{
    core::{RegexScanner, Scanner},
    session::Effect,
};

pub fn annotate(cmd: AnnotateCommand) -> Result<ExitStatus> {
    let mut workspace = match prepare(&cmd.common)? {
        Setup::Ready(workspace) => workspace,
        Setup::Exit(status) => return Ok(status),
    };

    let effects = workspace
        .session
        .open(workspace.document.clone(), Instant::now());
    print_annotation_effects(&workspace, &effects);
    Ok(ExitStatus::Success)
}

/// Print every `SetAnnotations` effect as an annotation report.
pub(crate) fn print_annotation_effects(workspace: &Workspace, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::SetAnnotations { annotations, .. } => {
                let references = RegexScanner.scan_keys(workspace.document.text()).len();
                let unresolved = references.saturating_sub(annotations.len());
                report::print_annotations(&workspace.document, annotations, unresolved);
            }
            other => report::print_message(other),
        }
    }
}
