//! Pretty diagnostic rendering using ariadne.
//!
//! Converts zplating's [`Diagnostic`] type into ariadne [`Report`]s for
//! coloured, source-annotated terminal output. Falls back to structured JSON
//! when the output is piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use zplating_diagnostics::{Diagnostic, LineIndex, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command and diagnostic rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics with source context to stderr.
///
/// `source` is the text the parser consumed; positions are mapped back into
/// it through a [`LineIndex`]. Diagnostics without a position are printed
/// as standalone messages.
pub(crate) fn render_diagnostics_pretty(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let index = LineIndex::new(source);
    let len = source.chars().count();
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let Some(pos) = diag.position else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // Underline the single offending character.
        let start = index.offset(pos).min(len);
        let end = (start + 1).min(len);

        let mut builder = Report::build(report_kind(&diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config);

        builder = builder.with_label(
            Label::new((filename, start..end))
                .with_message(make_label_message(diag))
                .with_color(severity_color(&diag.severity)),
        );

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// Build a concise label from diagnostic context, falling back to the message.
fn make_label_message(diag: &Diagnostic) -> String {
    match &diag.context {
        Some(ctx) if !ctx.is_empty() => ctx
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => diag.message.clone(),
    }
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// Render diagnostics as a JSON array to stdout.
pub(crate) fn render_diagnostics_json(diagnostics: &[Diagnostic]) {
    let json =
        serde_json::to_string_pretty(diagnostics).expect("Diagnostic serialization cannot fail");
    println!("{json}");
}

// ── Unified entry point ─────────────────────────────────────────────────

/// Render diagnostics in the given format.
///
/// - `Pretty` → coloured output to stderr (command output stays on stdout).
/// - `Json`   → JSON array to stdout.
pub(crate) fn render_diagnostics(
    source: &str,
    filename: &str,
    diagnostics: &[Diagnostic],
    format: Format,
) {
    match format {
        Format::Pretty => render_diagnostics_pretty(source, filename, diagnostics),
        Format::Json => render_diagnostics_json(diagnostics),
    }
}
