/// Parsed command records.
pub mod command;
/// JSON serialization helpers for parsed commands.
pub mod dump;
/// ZPL emitter: renders parsed commands back to ZPL text.
pub mod emit;
/// Streaming parser: the character-at-a-time state machine.
pub mod parser;
/// Built-in command lexicon and argument grammars.
pub mod table;
