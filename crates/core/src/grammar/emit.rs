use super::{
    command::Command,
    table::{ArgFormat, Grammar, Reconfigure},
};
use crate::config::ParserConfig;

/// Configuration for the ZPL emitter.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Leaders and delimiter in effect before the first command.
    pub start: ParserConfig,
    /// Put each command on its own line. When `false`, commands are
    /// concatenated with no separator.
    pub line_per_command: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            start: ParserConfig::default(),
            line_per_command: true,
        }
    }
}

impl EmitConfig {
    /// Start from the given leaders and delimiter.
    pub fn with_start(mut self, start: ParserConfig) -> Self {
        self.start = start;
        self
    }

    /// Choose between one command per line and concatenated output.
    pub fn with_line_per_command(mut self, line_per_command: bool) -> Self {
        self.line_per_command = line_per_command;
        self
    }
}

/// Render commands back to ZPL text with the default configuration.
pub fn emit_zpl(commands: &[Command]) -> String {
    emit_zpl_with(commands, &EmitConfig::default())
}

/// Render commands back to ZPL text.
///
/// Each command is written with whatever leader and delimiter are in effect
/// at that point in the stream, so output following a `^CC`, `^CT` or `^CD`
/// uses the new characters. Parsing the output yields the same commands.
pub fn emit_zpl_with(commands: &[Command], config: &EmitConfig) -> String {
    let grammar = Grammar::builtin();
    let ParserConfig {
        mut caret,
        mut tilde,
        mut delimiter,
    } = config.start;
    let mut out = String::new();

    for cmd in commands {
        out.push(if cmd.is_caret_style() { caret } else { tilde });
        out.push_str(cmd.name());

        let entry = grammar.lookup(&cmd.mnemonic);
        match entry {
            Some(entry) => write_args(&mut out, entry.formats, &cmd.args, delimiter),
            None => {
                for (i, arg) in cmd.args.iter().enumerate() {
                    if i > 0 {
                        out.push(delimiter);
                    }
                    out.push_str(arg);
                }
            }
        }
        if config.line_per_command {
            out.push('\n');
        }

        let effect = entry.and_then(|e| e.effect);
        let first = cmd.arg(0).and_then(|a| a.chars().next());
        if let (Some(effect), Some(ch)) = (effect, first) {
            match effect {
                Reconfigure::Caret => caret = ch,
                Reconfigure::Tilde => tilde = ch,
                Reconfigure::Delimiter => delimiter = ch,
            }
        }
    }
    out
}

fn write_args(out: &mut String, formats: &[ArgFormat], args: &[String], delimiter: char) {
    let mut values = args.iter();
    let mut after_param = false;
    for format in formats {
        match format {
            ArgFormat::Byte | ArgFormat::Text => {
                if let Some(v) = values.next() {
                    out.push_str(v);
                }
                after_param = false;
            }
            ArgFormat::Param => {
                if after_param {
                    out.push(delimiter);
                }
                if let Some(v) = values.next() {
                    out.push_str(v);
                }
                after_param = true;
            }
            ArgFormat::Delimiter => {
                out.push(delimiter);
                after_param = false;
            }
        }
    }
}
