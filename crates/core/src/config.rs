//! Configuration for a parsing session.

/// Initial lexical characters for a [`StreamParser`](crate::StreamParser).
///
/// ZPL printers can be configured to power up with non-default leaders, so a
/// session may start from something other than `^`, `~`, and `,`. Commands
/// such as `^CC` still change these mid-stream.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Leader for caret-style (format) commands.
    pub caret: char,
    /// Leader for tilde-style (control) commands.
    pub tilde: char,
    /// Separator between delimited parameters.
    pub delimiter: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            caret: '^',
            tilde: '~',
            delimiter: ',',
        }
    }
}

impl ParserConfig {
    /// Set the initial caret-style leader.
    pub fn with_caret(mut self, caret: char) -> Self {
        self.caret = caret;
        self
    }

    /// Set the initial tilde-style leader.
    pub fn with_tilde(mut self, tilde: char) -> Self {
        self.tilde = tilde;
        self
    }

    /// Set the initial parameter delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}
