use super::{
    command::Command,
    table::{ArgFormat, Grammar, GrammarEntry, MAX_MNEMONIC_LEN, Reconfigure},
};
use crate::config::ParserConfig;
use crate::error::{ErrorKind, ParseError};
use zplating_diagnostics::Position;

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a complete ZPL string with the default lexical characters.
///
/// Equivalent to feeding every character to a fresh [`StreamParser`] and
/// calling [`StreamParser::finish`].
pub fn parse_str(input: &str) -> Result<Vec<Command>, ParseError> {
    parse_str_with_config(input, ParserConfig::default())
}

/// Parse a complete ZPL string starting from the given lexical characters.
pub fn parse_str_with_config(input: &str, config: ParserConfig) -> Result<Vec<Command>, ParseError> {
    let mut parser = StreamParser::with_config(config);
    parser.feed_str(input);
    parser.finish()?;
    Ok(parser.into_commands())
}

/// Lifecycle phase of a [`StreamParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between commands; waiting for a leader.
    Ready,
    /// A caret-style leader was read; accumulating the mnemonic.
    CaretCommand,
    /// A tilde-style leader was read; accumulating the mnemonic.
    TildeCommand,
    /// A mnemonic was recognized; filling its argument slots.
    Arguments,
    /// Parsing failed. Terminal.
    Error,
    /// Input was exhausted without error. Terminal.
    Finished,
}

/// Outcome of running one character through the state machine once.
enum Step {
    Consumed,
    /// The character ended the current argument and must be seen again by
    /// whatever comes next.
    Refeed,
    Failed,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Push-based, character-at-a-time ZPL parser.
///
/// Input may arrive in chunks of any size; only the command currently being
/// parsed is buffered. Completed commands accumulate in [`commands`](Self::commands).
///
/// ```
/// use zplating_core::StreamParser;
///
/// let mut parser = StreamParser::new();
/// assert!(parser.feed_str("^FO100,"));
/// assert!(parser.feed_str("200^FS"));
/// parser.finish().unwrap();
/// assert_eq!(parser.commands()[0].args, ["100", "200"]);
/// ```
#[derive(Debug)]
pub struct StreamParser {
    grammar: &'static Grammar,
    config: ParserConfig,
    phase: Phase,
    /// Location of the next character to be fed.
    position: Position,

    // Leaders and delimiter, rewritten mid-stream by ^CC, ^CT and ^CD.
    caret: char,
    tilde: char,
    delimiter: char,

    // The command in progress.
    mnemonic: String,
    leader: char,
    entry: GrammarEntry,
    slot: usize,
    arg: String,
    args: Vec<String>,

    commands: Vec<Command>,
    error: Option<ParseError>,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamParser {
    /// A parser using the default leaders (`^`, `~`) and delimiter (`,`).
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// A parser starting from the given lexical characters.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            grammar: Grammar::builtin(),
            config,
            phase: Phase::Ready,
            position: Position::start(),
            caret: config.caret,
            tilde: config.tilde,
            delimiter: config.delimiter,
            mnemonic: String::new(),
            leader: config.caret,
            entry: GrammarEntry::default(),
            slot: 0,
            arg: String::new(),
            args: Vec::new(),
            commands: Vec::new(),
            error: None,
        }
    }

    /// Discard all state, including output, and start over from the
    /// configuration this parser was created with.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The terminal error, once parsing has failed.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Whether the parser has entered the error phase.
    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Error
    }

    /// Commands completed so far, in completion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consume the parser, returning its completed commands.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Active caret-style leader.
    pub fn caret(&self) -> char {
        self.caret
    }

    /// Active tilde-style leader.
    pub fn tilde(&self) -> char {
        self.tilde
    }

    /// Active parameter delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Location of the next character to be fed.
    pub fn position(&self) -> Position {
        self.position
    }

    // ── Feeding ─────────────────────────────────────────────────────────

    /// Feed every character of `input`, stopping at the first failure.
    ///
    /// Returns `false` if the parser is (or becomes) unable to continue.
    pub fn feed_str(&mut self, input: &str) -> bool {
        input.chars().all(|c| self.feed(c))
    }

    /// Advance the state machine by exactly one character.
    ///
    /// Returns `false` once the parser has failed or finished; in that case
    /// no state is modified.
    pub fn feed(&mut self, c: char) -> bool {
        if matches!(self.phase, Phase::Error | Phase::Finished) {
            return false;
        }
        let at = self.position;
        self.advance_position(c);
        // Line feeds only matter for position tracking.
        if c == '\n' {
            return true;
        }
        loop {
            let step = match self.phase {
                Phase::Ready => self.step_ready(c, at),
                Phase::CaretCommand | Phase::TildeCommand => self.step_mnemonic(c, at),
                Phase::Arguments => self.step_argument(c, at),
                Phase::Error | Phase::Finished => Step::Failed,
            };
            match step {
                Step::Consumed => return true,
                Step::Refeed => continue,
                Step::Failed => return false,
            }
        }
    }

    /// Signal end of input.
    ///
    /// A command whose remaining slots are all `Param` or `Text` is completed
    /// as if the next command had started; anything else left pending is an
    /// error. Afterwards the parser is inert.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        let at = self.position;
        match self.phase {
            Phase::Ready | Phase::Error | Phase::Finished => {}
            Phase::CaretCommand | Phase::TildeCommand => {
                let mnemonic = self.mnemonic.clone();
                self.fail(ErrorKind::UnknownCommand { mnemonic }, at);
            }
            Phase::Arguments => {
                let formats = self.entry.formats;
                let pending = formats.get(self.slot..).unwrap_or_default();
                if pending
                    .iter()
                    .all(|f| matches!(f, ArgFormat::Param | ArgFormat::Text))
                {
                    for &format in pending {
                        self.complete_slot(format);
                    }
                } else {
                    let mnemonic = self.mnemonic.clone();
                    self.fail(ErrorKind::TooFewArguments { mnemonic }, at);
                }
            }
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.phase = Phase::Finished;
        Ok(())
    }

    // ── Phases ──────────────────────────────────────────────────────────

    fn step_ready(&mut self, c: char, at: Position) -> Step {
        if c.is_whitespace() {
            return Step::Consumed;
        }
        // Caret wins when ^CC/^CT have made both leaders the same character.
        if c == self.caret {
            self.begin_command(Phase::CaretCommand, '^', c);
        } else if c == self.tilde {
            self.begin_command(Phase::TildeCommand, '~', c);
        } else {
            return self.fail(
                ErrorKind::UnexpectedCharacter {
                    found: c,
                    caret: self.caret,
                    tilde: self.tilde,
                },
                at,
            );
        }
        Step::Consumed
    }

    fn step_mnemonic(&mut self, c: char, at: Position) -> Step {
        self.mnemonic.push(c);
        match self.grammar.lookup(&self.mnemonic).copied() {
            Some(entry) => {
                self.entry = entry;
                if entry.is_bare() {
                    self.emit();
                } else {
                    self.phase = Phase::Arguments;
                }
            }
            None if self.mnemonic.chars().count() > MAX_MNEMONIC_LEN => {
                let mnemonic = self.mnemonic.clone();
                return self.fail(ErrorKind::UnknownCommand { mnemonic }, at);
            }
            None => {}
        }
        Step::Consumed
    }

    fn step_argument(&mut self, c: char, at: Position) -> Step {
        let Some(&format) = self.entry.formats.get(self.slot) else {
            let mnemonic = self.mnemonic.clone();
            return self.fail(ErrorKind::TooManyArguments { mnemonic }, at);
        };
        match format {
            ArgFormat::Byte => {
                self.arg.push(c);
                self.complete_slot(format);
                Step::Consumed
            }
            ArgFormat::Delimiter if c == self.delimiter => {
                self.complete_slot(format);
                Step::Consumed
            }
            ArgFormat::Delimiter => self.fail(
                ErrorKind::ExpectedDelimiter {
                    expected: self.delimiter,
                    found: c,
                },
                at,
            ),
            ArgFormat::Param if c == self.delimiter => {
                self.complete_slot(format);
                Step::Consumed
            }
            ArgFormat::Param | ArgFormat::Text => {
                if self.is_leader(c) {
                    self.complete_slot(format);
                    Step::Refeed
                } else {
                    self.arg.push(c);
                    Step::Consumed
                }
            }
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn is_leader(&self, c: char) -> bool {
        c == self.caret || c == self.tilde
    }

    fn advance_position(&mut self, c: char) {
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
    }

    fn begin_command(&mut self, phase: Phase, prefix: char, leader: char) {
        self.phase = phase;
        self.mnemonic.clear();
        self.mnemonic.push(prefix);
        self.leader = leader;
        self.entry = GrammarEntry::default();
        self.slot = 0;
        self.arg.clear();
        self.args.clear();
    }

    /// Close the current slot; emits the command if it was the last one.
    fn complete_slot(&mut self, format: ArgFormat) {
        if format.yields_value() {
            self.args.push(std::mem::take(&mut self.arg));
        }
        self.slot += 1;
        if self.slot == self.entry.formats.len() {
            self.emit();
        }
    }

    fn emit(&mut self) {
        let command = Command {
            mnemonic: std::mem::take(&mut self.mnemonic),
            leader: self.leader,
            args: std::mem::take(&mut self.args),
        };
        if let Some(effect) = self.entry.effect {
            self.reconfigure(effect, &command);
        }
        log::trace!("emit {command}");
        self.commands.push(command);

        self.entry = GrammarEntry::default();
        self.slot = 0;
        self.arg.clear();
        self.phase = Phase::Ready;
    }

    fn reconfigure(&mut self, effect: Reconfigure, command: &Command) {
        let Some(ch) = command.args.first().and_then(|a| a.chars().next()) else {
            return;
        };
        let target = match effect {
            Reconfigure::Caret => &mut self.caret,
            Reconfigure::Tilde => &mut self.tilde,
            Reconfigure::Delimiter => &mut self.delimiter,
        };
        log::debug!("{} changes {effect:?} from {:?} to {ch:?}", command.mnemonic, *target);
        *target = ch;
    }

    fn fail(&mut self, kind: ErrorKind, at: Position) -> Step {
        let err = ParseError::new(kind, at);
        log::debug!("parse failed: {err}");
        self.error = Some(err);
        self.phase = Phase::Error;
        Step::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mnemonics(p: &StreamParser) -> Vec<&str> {
        p.commands().iter().map(|c| c.mnemonic.as_str()).collect()
    }

    #[test]
    fn bare_command_emits_on_last_mnemonic_char() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^X"));
        assert_eq!(p.phase(), Phase::CaretCommand);
        assert!(p.commands().is_empty());
        assert!(p.feed('A'));
        assert_eq!(p.phase(), Phase::Ready);
        assert_eq!(mnemonics(&p), ["^XA"]);
    }

    #[test]
    fn mnemonic_with_args_enters_argument_phase() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^FO"));
        assert_eq!(p.phase(), Phase::Arguments);
        assert!(p.commands().is_empty());
    }

    #[test]
    fn leader_terminating_text_is_refed_as_next_command() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^FDab"));
        assert!(p.feed('^'));
        assert_eq!(p.phase(), Phase::CaretCommand);
        assert_eq!(p.commands()[0].args, ["ab"]);
    }

    #[test]
    fn line_feeds_are_transparent_everywhere() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^F\nO1\n0,2\n0^F\nS"));
        p.finish().unwrap();
        assert_eq!(p.commands()[0].args, ["10", "20"]);
        assert_eq!(mnemonics(&p), ["^FO", "^FS"]);
    }

    #[test]
    fn position_tracks_lines_and_columns() {
        let mut p = StreamParser::new();
        p.feed_str("^XA\n^F");
        assert_eq!(p.position(), Position::new(2, 3));
    }

    #[test]
    fn refeed_does_not_double_count_column() {
        let mut p = StreamParser::new();
        // The second '^' both ends ^FD and starts ^ZZZZ, which fails on column 9.
        assert!(!p.feed_str("^FDx^ZZZZ"));
        let err = p.error().unwrap();
        assert_eq!(err.position, Position::new(1, 9));
    }

    #[test]
    fn four_char_mnemonic_is_still_pending() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^ZZZ"));
        assert_eq!(p.phase(), Phase::CaretCommand);
        assert!(p.error().is_none());
    }

    #[test]
    fn carriage_return_is_kept_in_arguments() {
        let mut p = StreamParser::new();
        assert!(p.feed_str("^FDa\rb^FO1\r,2^FS"));
        p.finish().unwrap();
        assert_eq!(p.commands()[0].args, ["a\rb"]);
        assert_eq!(p.commands()[1].args, ["1\r", "2"]);
    }

    #[test]
    fn finish_completes_trailing_params() {
        let mut p = StreamParser::new();
        p.feed_str("^FO5");
        p.finish().unwrap();
        assert_eq!(p.commands()[0].args, ["5", ""]);
        assert_eq!(p.phase(), Phase::Finished);
        assert!(!p.feed('^'), "finished parser is inert");
    }

    #[test]
    fn finish_with_pending_byte_is_too_few_arguments() {
        let mut p = StreamParser::new();
        p.feed_str("^XA^CC");
        let err = p.finish().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TooFewArguments { ref mnemonic } if mnemonic == "^CC"));
        assert_eq!(err.position, Position::new(1, 7));
        assert_eq!(mnemonics(&p), ["^XA"]);
    }

    #[test]
    fn failed_finish_leaves_pending_arguments_untouched() {
        let mut p = StreamParser::new();
        p.feed_str("^A0");
        assert!(p.finish().is_err());
        assert_eq!(p.args, ["0"]);
        assert_eq!(p.slot, 1);
        assert!(p.arg.is_empty());
        assert!(p.commands().is_empty());
    }

    #[test]
    fn finish_mid_mnemonic_is_unknown_command() {
        let mut p = StreamParser::new();
        p.feed_str("^X");
        let err = p.finish().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownCommand { ref mnemonic } if mnemonic == "^X"));
        assert!(p.is_failed());
    }

    #[test]
    fn finish_after_failure_returns_stored_error() {
        let mut p = StreamParser::new();
        assert!(!p.feed('x'));
        let stored = p.error().cloned().unwrap();
        assert_eq!(p.finish().unwrap_err(), stored);
        assert!(p.is_failed());
    }

    #[test]
    fn too_many_arguments_when_slots_exhausted() {
        // The state machine emits at the last slot, so force the condition.
        let mut p = StreamParser::new();
        p.feed_str("^FO");
        p.slot = p.entry.formats.len();
        assert!(!p.feed('1'));
        assert!(matches!(
            p.error().map(|e| &e.kind),
            Some(ErrorKind::TooManyArguments { .. })
        ));
    }

    #[test]
    fn reset_restores_configured_state() {
        let mut p = StreamParser::with_config(ParserConfig::default().with_delimiter(';'));
        p.feed_str("^CD|^XA");
        assert_eq!(p.delimiter(), '|');
        p.reset();
        assert_eq!(p.delimiter(), ';');
        assert!(p.commands().is_empty());
        assert_eq!(p.position(), Position::start());
    }

    #[test]
    fn parser_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<StreamParser>();
    }
}
