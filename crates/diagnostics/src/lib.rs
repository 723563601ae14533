//! Diagnostics for the zplating parser.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Position`], and [`LineIndex`]
//! types used to report parse failures. Diagnostic codes are defined in the
//! [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── Position ─────────────────────────────────────────────────────────────

/// A 1-based line/column location in the source stream.
///
/// Columns count characters, not bytes. A line feed moves to the next line
/// and resets the column to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Create a position. Both components are 1-based.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The first character of a stream.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps 1-based [`Position`]s back to character offsets in a source string.
///
/// Renderers need offsets into the text they display, while the streaming
/// parser only knows line and column. The index is built in O(n) time and
/// each lookup is O(1).
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Character offset of the start of each line.
    /// `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    /// Total number of characters in the source.
    len: usize,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        let mut len = 0usize;
        for (i, c) in text.chars().enumerate() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
            len = i + 1;
        }
        Self { line_starts, len }
    }

    /// Convert a position to a character offset.
    ///
    /// Lines past the end clamp to the end of the source; columns past the
    /// end of their line are not clamped to the line, only to the source.
    pub fn offset(&self, pos: Position) -> usize {
        let line = pos.line.max(1) - 1;
        match self.line_starts.get(line) {
            Some(start) => (start + pos.column.max(1) - 1).min(self.len),
            None => self.len,
        }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// Severity level for a diagnostic message.
///
/// Every parse failure is terminal, so errors are the only level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hard error: the input is invalid.
    Error,
}

/// A diagnostic message produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"ZPL1002"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Location of the offending character, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        position: Option<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            position,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        position: Option<Position>,
    ) -> Self {
        Self::new(id, Severity::Error, message, position)
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }

    /// Whether this diagnostic is a hard error.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)?;
        if let Some(pos) = self.position {
            write!(f, " at {pos}")?;
        }
        Ok(())
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::PARSER_UNEXPECTED_CHARACTER => Some(
            "Outside of a command only whitespace and the active command leaders \
             (default ^ and ~) may appear. ^CC and ^CT change which characters lead commands.",
        ),
        codes::PARSER_UNKNOWN_COMMAND => Some(
            "The characters after a command leader did not match any known command \
             within the maximum mnemonic length.",
        ),
        codes::PARSER_TOO_MANY_ARGUMENTS => Some(
            "The command received more argument slots than its grammar defines.",
        ),
        codes::PARSER_TOO_FEW_ARGUMENTS => Some(
            "Input ended before every argument slot of the last command was filled.",
        ),
        codes::PARSER_EXPECTED_DELIMITER => Some(
            "The command's grammar requires the active argument delimiter (default ,) \
             at this point. ^CD changes the delimiter.",
        ),
        _ => None,
    }
}
