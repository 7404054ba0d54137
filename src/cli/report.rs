//! Report formatting and printing utilities.
//!
//! Annotations and rewrite previews are displayed in cargo-style format.
//! Separate from core logic to allow vvtrans to be used as a library.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::core::{Annotation, Document, RenderOptions, RewritePlan};
use crate::session::Effect;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the annotations of a document to stdout.
pub fn print_annotations(document: &Document, annotations: &[Annotation], unresolved: usize) {
    print_annotations_to(document, annotations, unresolved, &mut io::stdout().lock());
}

/// Print annotations to a custom writer.
///
/// `unresolved` is the number of key references with no corpus entry.
pub fn print_annotations_to<W: Write>(
    document: &Document,
    annotations: &[Annotation],
    unresolved: usize,
    writer: &mut W,
) {
    let path = document.path().display().to_string();
    let width = line_number_width(annotations.iter().map(|a| a.range.start.line));

    for annotation in annotations {
        let start = annotation.range.start;
        let Some(source_line) = document.line(start.line) else {
            continue;
        };
        let line_no = start.line + 1;
        let _ = writeln!(
            writer,
            "{} {}",
            annotation.key.bold(),
            styled(&annotation.render_options)
        );
        let _ = writeln!(
            writer,
            "{:>width$}{} {}:{}:{}",
            "",
            "-->".blue(),
            path,
            line_no,
            start.character + 1,
            width = width
        );
        let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line_no.to_string().blue(),
            "|".blue(),
            source_line,
            width = width
        );

        let prefix: String = source_line.chars().take(start.character).collect();
        let padding = UnicodeWidthStr::width(prefix.as_str());
        let underline_len = if annotation.range.end.line == start.line {
            let call: String = source_line
                .chars()
                .skip(start.character)
                .take(annotation.range.end.character - start.character)
                .collect();
            UnicodeWidthStr::width(call.as_str()).max(1)
        } else {
            1
        };
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{} {}",
            "",
            "|".blue(),
            "",
            "^".repeat(underline_len).cyan(),
            styled(&annotation.render_options),
            width = width,
            padding = padding
        );
        let _ = writeln!(writer);
    }

    let summary = format!(
        "{} translation(s) shown in {}",
        annotations.len(),
        path
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), summary.green());
    if unresolved > 0 {
        let _ = writeln!(
            writer,
            "{} {} key reference(s) have no corpus entry",
            "warning:".bold().yellow(),
            unresolved
        );
    }
}

/// Print a rewrite preview to stdout.
pub fn print_rewrite_preview(document: &Document, plan: &RewritePlan) {
    print_rewrite_preview_to(document, plan, &mut io::stdout().lock());
}

/// Print a rewrite preview to a custom writer.
pub fn print_rewrite_preview_to<W: Write>(document: &Document, plan: &RewritePlan, writer: &mut W) {
    let path = document.path().display().to_string();
    for edit in &plan.edits {
        let start = edit.range.start;
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            path,
            start.line + 1,
            start.character + 1
        );
        let _ = writeln!(writer, "  {} {}", "-".red(), edit.original.red());
        let _ = writeln!(writer, "  {} {}", "+".green(), edit.replacement.green());
        let _ = writeln!(writer);
    }
    print_skipped_to(document, plan, writer);
}

fn print_skipped_to<W: Write>(document: &Document, plan: &RewritePlan, writer: &mut W) {
    if plan.skipped.is_empty() {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} literal call(s) have no corpus entry and were left unchanged:",
        "note:".bold(),
        plan.skipped.len()
    );
    for skipped in &plan.skipped {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}  {}",
            "-".dimmed(),
            document.path().display(),
            skipped.range.start.line + 1,
            skipped.range.start.character + 1,
            format!("\"{}\"", skipped.literal).dimmed()
        );
    }
}

/// Print a host effect message. Errors go to stderr.
pub fn print_message(effect: &Effect) {
    match effect {
        Effect::ShowError(message) => {
            eprintln!("{} {}", "error:".bold().red(), message);
        }
        Effect::ShowInfo(message) => {
            println!("{} {}", "info:".bold().cyan(), message);
        }
        Effect::SetAnnotations { .. }
        | Effect::ApplyEdit { .. }
        | Effect::SkippedLiterals { .. } => {}
    }
}

/// Apply the configured style to the overlay text.
fn styled(options: &RenderOptions) -> ColoredString {
    let mut text: ColoredString = options.content_text.as_str().into();
    if let Some((r, g, b)) = options.color().and_then(parse_hex_color) {
        text = text.truecolor(r, g, b);
    }
    if options.is_italic() {
        text = text.italic();
    }
    if options.opacity().is_some_and(|opacity| opacity < 1.0) {
        text = text.dimmed();
    }
    text
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn line_number_width(lines: impl Iterator<Item = usize>) -> usize {
    lines
        .map(|line| (line + 1).to_string().len())
        .max()
        .unwrap_or(1)
}
