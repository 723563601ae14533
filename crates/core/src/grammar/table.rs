use std::collections::HashMap;
use std::sync::LazyLock;

/// Longest unmatched mnemonic the parser will hold, counting its leader.
///
/// Growing past this length without a table match is an unknown-command
/// error, so `^ZZZZ` is the first mnemonic rejected.
pub const MAX_MNEMONIC_LEN: usize = 4;

/// How one argument slot of a command is lexically terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgFormat {
    /// Exactly one raw character.
    Byte,
    /// Free text up to the next active command leader.
    Text,
    /// Text up to the active delimiter or the next command leader.
    Param,
    /// The active delimiter itself; consumed and discarded.
    Delimiter,
}

impl ArgFormat {
    /// Whether this slot produces an argument value.
    pub fn yields_value(self) -> bool {
        !matches!(self, ArgFormat::Delimiter)
    }
}

/// Lexical state a command rewrites when it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconfigure {
    /// `^CC` / `~CC`: change the caret-style leader.
    Caret,
    /// `^CT` / `~CT`: change the tilde-style leader.
    Tilde,
    /// `^CD` / `~CD`: change the parameter delimiter.
    Delimiter,
}

/// The argument grammar of one command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrammarEntry {
    /// Ordered argument slots. Empty means the command takes no arguments.
    pub formats: &'static [ArgFormat],
    /// Parser state changed by this command, if any.
    pub effect: Option<Reconfigure>,
}

impl GrammarEntry {
    const fn plain(formats: &'static [ArgFormat]) -> Self {
        Self {
            formats,
            effect: None,
        }
    }

    const fn reconfigure(effect: Reconfigure) -> Self {
        Self {
            formats: BYTE,
            effect: Some(effect),
        }
    }

    /// Whether the command is complete as soon as its mnemonic is read.
    pub fn is_bare(&self) -> bool {
        self.formats.is_empty()
    }
}

use ArgFormat::{Byte, Delimiter, Param, Text};

const NONE: &[ArgFormat] = &[];
const BYTE: &[ArgFormat] = &[Byte];
const TEXT: &[ArgFormat] = &[Text];
const P1: &[ArgFormat] = &[Param];
const P2: &[ArgFormat] = &[Param, Param];
const P3: &[ArgFormat] = &[Param, Param, Param];
const P4: &[ArgFormat] = &[Param, Param, Param, Param];
const P5: &[ArgFormat] = &[Param, Param, Param, Param, Param];
const P6: &[ArgFormat] = &[Param, Param, Param, Param, Param, Param];
// ^A: font name and orientation are single characters, then ",height,width".
const FONT: &[ArgFormat] = &[Byte, Byte, Delimiter, Param, Param];

/// Canonical mnemonics (leader `^` or `~`) and their argument grammars.
const ENTRIES: &[(&str, GrammarEntry)] = &[
    ("^A", GrammarEntry::plain(FONT)),
    ("^B3", GrammarEntry::plain(P5)),
    ("^BC", GrammarEntry::plain(P6)),
    ("^BQ", GrammarEntry::plain(P3)),
    ("^BY", GrammarEntry::plain(P3)),
    ("^CC", GrammarEntry::reconfigure(Reconfigure::Caret)),
    ("~CC", GrammarEntry::reconfigure(Reconfigure::Caret)),
    ("^CD", GrammarEntry::reconfigure(Reconfigure::Delimiter)),
    ("~CD", GrammarEntry::reconfigure(Reconfigure::Delimiter)),
    ("^CF", GrammarEntry::plain(P3)),
    ("^CT", GrammarEntry::reconfigure(Reconfigure::Tilde)),
    ("~CT", GrammarEntry::reconfigure(Reconfigure::Tilde)),
    ("^FB", GrammarEntry::plain(P5)),
    ("^FD", GrammarEntry::plain(TEXT)),
    ("^FN", GrammarEntry::plain(P1)),
    ("^FO", GrammarEntry::plain(P2)),
    ("^FR", GrammarEntry::plain(NONE)),
    ("^FS", GrammarEntry::plain(NONE)),
    ("^FV", GrammarEntry::plain(TEXT)),
    ("^FX", GrammarEntry::plain(TEXT)),
    ("^GB", GrammarEntry::plain(P5)),
    ("~HS", GrammarEntry::plain(NONE)),
    ("~JA", GrammarEntry::plain(NONE)),
    ("^LH", GrammarEntry::plain(P2)),
    ("^LL", GrammarEntry::plain(P1)),
    ("^LR", GrammarEntry::plain(P1)),
    ("^MD", GrammarEntry::plain(P1)),
    ("^PQ", GrammarEntry::plain(P4)),
    ("^PR", GrammarEntry::plain(P3)),
    ("^PW", GrammarEntry::plain(P1)),
    ("^XA", GrammarEntry::plain(NONE)),
    ("^XZ", GrammarEntry::plain(NONE)),
];

static BUILTIN: LazyLock<Grammar> = LazyLock::new(|| Grammar {
    entries: ENTRIES.iter().copied().collect(),
});

/// Immutable lexicon of known commands, keyed by canonical mnemonic.
#[derive(Debug)]
pub struct Grammar {
    entries: HashMap<&'static str, GrammarEntry>,
}

impl Grammar {
    /// The built-in lexicon, constructed once per process.
    pub fn builtin() -> &'static Grammar {
        &BUILTIN
    }

    /// Look up a canonical mnemonic such as `"^FO"`.
    pub fn lookup(&self, mnemonic: &str) -> Option<&GrammarEntry> {
        self.entries.get(mnemonic)
    }

    /// Iterate over all mnemonics, in no particular order.
    pub fn mnemonics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of known commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
