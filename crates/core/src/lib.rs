//! zplating core library.
//!
//! A push-based parser for ZPL (Zebra Programming Language) that consumes
//! input one character at a time and produces [`Command`] records. The main
//! entry points are [`StreamParser`] for incremental input, [`parse_str`]
//! for whole strings, and [`parse_reader`] for any [`std::io::Read`].

#![warn(missing_docs)]

/// Session configuration.
pub mod config;
/// Parse error types.
pub mod error;
/// ZPL grammar: command lexicon, parser, emitter, and related utilities.
pub mod grammar;
/// Chunked parsing from byte readers.
pub mod reader;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::parser::{Phase, StreamParser, parse_str, parse_str_with_config};
pub use reader::parse_reader;

// Records and grammar
pub use grammar::command::Command;
pub use grammar::table::{ArgFormat, Grammar, GrammarEntry, Reconfigure};

// Emitter
pub use grammar::emit::{EmitConfig, emit_zpl, emit_zpl_with};

// Errors and diagnostics
pub use error::{ErrorKind, ParseError};
pub use zplating_diagnostics::{Diagnostic, Position, Severity, codes};

// Configuration
pub use config::ParserConfig;

// Serialization helpers
pub use grammar::dump::to_pretty_json;
