use serde::{Deserialize, Serialize};

/// A fully parsed command: mnemonic plus its ordered arguments.
///
/// Commands are only produced once every argument slot of the mnemonic's
/// grammar has been filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Canonical mnemonic including its style prefix (e.g., `"^FO"`).
    ///
    /// The prefix is `^` for caret-style and `~` for tilde-style commands,
    /// even when `^CC` or `^CT` has changed the character that actually
    /// introduced the command.
    pub mnemonic: String,
    /// The character that introduced this command in the source.
    pub leader: char,
    /// Argument values in slot order. Delimiter-only slots contribute nothing.
    pub args: Vec<String>,
}

impl Command {
    /// Build a command from its parts.
    pub fn new(mnemonic: impl Into<String>, leader: char, args: Vec<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            leader,
            args,
        }
    }

    /// The mnemonic without its style prefix (e.g., `"FO"`).
    pub fn name(&self) -> &str {
        let mut chars = self.mnemonic.chars();
        chars.next();
        chars.as_str()
    }

    /// Whether this is a caret-style (format) command.
    pub fn is_caret_style(&self) -> bool {
        self.mnemonic.starts_with('^')
    }

    /// Argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.mnemonic, self.args.join(","))
    }
}
