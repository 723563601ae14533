//! `zplating`: parse, check, and re-print ZPL label files.

mod render;

use std::fs::File;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use zplating_core::{
    EmitConfig, ParserConfig, StreamParser, emit_zpl_with, parse_reader, to_pretty_json,
};
use zplating_diagnostics::{self as diag, Diagnostic};

use crate::render::{Format, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zplating",
    version,
    about = "Streaming ZPL parser: parse, check, and re-print Zebra Programming Language files"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(flatten)]
    lexicon: LexiconArgs,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Leaders and delimiter the parser starts with.
#[derive(Args, Debug)]
struct LexiconArgs {
    /// Initial caret-style (format) command leader.
    #[arg(long, global = true, default_value_t = '^')]
    caret: char,
    /// Initial tilde-style (control) command leader.
    #[arg(long, global = true, default_value_t = '~')]
    tilde: char,
    /// Initial parameter delimiter.
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,
}

impl From<&LexiconArgs> for ParserConfig {
    fn from(args: &LexiconArgs) -> Self {
        ParserConfig::default()
            .with_caret(args.caret)
            .with_tilde(args.tilde)
            .with_delimiter(args.delimiter)
    }
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a ZPL file (or `-` for stdin) and print its commands as JSON.
    Parse { file: String },

    /// Parse a ZPL file and print it back as ZPL, one command per line.
    Print {
        file: String,
        /// Concatenate commands without line breaks.
        #[arg(long)]
        compact: bool,
    },

    /// Syntax-check a ZPL file.
    Check { file: String },

    /// Explain a diagnostic ID (e.g. ZPL1002).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    let config = ParserConfig::from(&cli.lexicon);

    match cli.cmd {
        Cmd::Parse { file } => cmd_parse(&file, config, format)?,
        Cmd::Print { file, compact } => cmd_print(&file, config, compact, format)?,
        Cmd::Check { file } => cmd_check(&file, config, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, config: ParserConfig, format: Format) -> Result<()> {
    let run = run_parser(file, config, format)?;
    let diagnostics = run.diagnostics();

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            let out = serde_json::json!({
                "commands": run.parser.commands(),
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Commands to stdout, diagnostics to stderr.
            println!("{}", to_pretty_json(run.parser.commands()));
            render_diagnostics(&run.source, file, &diagnostics, format);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_print(file: &str, config: ParserConfig, compact: bool, format: Format) -> Result<()> {
    let run = run_parser(file, config, format)?;
    let diagnostics = run.diagnostics();

    // Partial output is not trustworthy once parsing has failed.
    if !diagnostics.is_empty() {
        render_diagnostics(&run.source, file, &diagnostics, format);
        exit_on_errors(&diagnostics);
    }

    let emit_config = EmitConfig::default()
        .with_start(config)
        .with_line_per_command(!compact);
    print!("{}", emit_zpl_with(run.parser.commands(), &emit_config));
    Ok(())
}

fn cmd_check(file: &str, config: ParserConfig, format: Format) -> Result<()> {
    let run = run_parser(file, config, format)?;
    let diagnostics = run.diagnostics();
    let ok = diagnostics.is_empty();

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "commands": run.parser.commands().len(),
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics(&run.source, file, &diagnostics, format);
            if ok {
                eprintln!("syntax ok ({} commands)", run.parser.commands().len());
            }
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// A finished parse plus, for pretty output, the text it consumed.
struct ParseRun {
    parser: StreamParser,
    /// Empty unless the input was captured for rendering.
    source: String,
}

impl ParseRun {
    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.parser
            .error()
            .map(|e| e.to_diagnostic())
            .into_iter()
            .collect()
    }
}

/// Stream `file` (or stdin for `-`) through a parser.
///
/// Pretty output renders errors against the source, so in that mode every
/// byte read is also kept in memory. JSON output needs only the position
/// and keeps nothing beyond the parser's own state.
fn run_parser(file: &str, config: ParserConfig, format: Format) -> Result<ParseRun> {
    let input: Box<dyn Read> = if file == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(file).with_context(|| format!("failed to open '{file}'"))?)
    };

    let mut recorder = Recorder::new(input, format == Format::Pretty);
    let parser = parse_reader(&mut recorder, config)
        .with_context(|| format!("failed to read '{file}'"))?;
    log::debug!(
        "parsed {} commands from {} bytes of '{file}'",
        parser.commands().len(),
        recorder.bytes
    );

    Ok(ParseRun {
        parser,
        source: recorder.into_source(),
    })
}

/// Reader adapter that counts bytes read and optionally keeps a copy.
struct Recorder<R> {
    inner: R,
    bytes: usize,
    seen: Option<Vec<u8>>,
}

impl<R: Read> Recorder<R> {
    fn new(inner: R, capture: bool) -> Self {
        Self {
            inner,
            bytes: 0,
            seen: capture.then(Vec::new),
        }
    }

    /// Captured input as text, or an empty string when not capturing.
    fn into_source(self) -> String {
        self.seen
            .map(|seen| String::from_utf8_lossy(&seen).into_owned())
            .unwrap_or_default()
    }
}

impl<R: Read> Read for Recorder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes += n;
        if let Some(seen) = &mut self.seen {
            seen.extend_from_slice(&buf[..n]);
        }
        Ok(n)
    }
}

/// Exit with code 1 if any diagnostic is an error.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(Diagnostic::is_error) {
        process::exit(1);
    }
}
