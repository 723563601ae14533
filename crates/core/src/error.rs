//! Typed errors for the streaming parser.

use std::collections::BTreeMap;

use zplating_diagnostics::{Diagnostic, Position, codes};

/// A terminal parse failure and the location of the character that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line and column of the offending character.
    pub position: Position,
}

/// Categories of parse failure.
///
/// Every failure is terminal for the session; there is no resynchronization.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A non-whitespace character appeared where a command leader was required.
    #[error("expected caret ({caret}) or tilde ({tilde}), got {found:?}")]
    UnexpectedCharacter {
        /// The character that was read.
        found: char,
        /// Active caret-style leader at the time.
        caret: char,
        /// Active tilde-style leader at the time.
        tilde: char,
    },

    /// The accumulated mnemonic does not name a known command.
    #[error("invalid command: {mnemonic}")]
    UnknownCommand {
        /// Canonical mnemonic accumulated so far, including its leader.
        mnemonic: String,
    },

    /// More argument slots were filled than the grammar defines.
    #[error("too many arguments: {mnemonic}")]
    TooManyArguments {
        /// The command being parsed.
        mnemonic: String,
    },

    /// Input ended before the command's argument slots were filled.
    #[error("too few arguments: {mnemonic}")]
    TooFewArguments {
        /// The command being parsed.
        mnemonic: String,
    },

    /// A strict delimiter slot received something other than the delimiter.
    #[error("expected delimiter {expected:?}, got {found:?}")]
    ExpectedDelimiter {
        /// Active delimiter.
        expected: char,
        /// The character that was read.
        found: char,
    },
}

impl ErrorKind {
    /// Diagnostic code for this kind of failure.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnexpectedCharacter { .. } => codes::PARSER_UNEXPECTED_CHARACTER,
            ErrorKind::UnknownCommand { .. } => codes::PARSER_UNKNOWN_COMMAND,
            ErrorKind::TooManyArguments { .. } => codes::PARSER_TOO_MANY_ARGUMENTS,
            ErrorKind::TooFewArguments { .. } => codes::PARSER_TOO_FEW_ARGUMENTS,
            ErrorKind::ExpectedDelimiter { .. } => codes::PARSER_EXPECTED_DELIMITER,
        }
    }

    fn context(&self) -> BTreeMap<String, String> {
        match self {
            ErrorKind::UnexpectedCharacter {
                found,
                caret,
                tilde,
            } => BTreeMap::from([
                ("found".into(), found.to_string()),
                ("caret".into(), caret.to_string()),
                ("tilde".into(), tilde.to_string()),
            ]),
            ErrorKind::UnknownCommand { mnemonic }
            | ErrorKind::TooManyArguments { mnemonic }
            | ErrorKind::TooFewArguments { mnemonic } => {
                BTreeMap::from([("command".into(), mnemonic.clone())])
            }
            ErrorKind::ExpectedDelimiter { expected, found } => BTreeMap::from([
                ("expected".into(), expected.to_string()),
                ("found".into(), found.to_string()),
            ]),
        }
    }
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// 1-based line of the offending character.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 1-based column of the offending character.
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Convert into an error-severity [`Diagnostic`] for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.kind.code(), self.kind.to_string(), Some(self.position))
            .with_context(self.kind.context())
    }
}
