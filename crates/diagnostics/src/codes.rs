//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

/// A non-whitespace character appeared where a command leader was required.
pub const PARSER_UNEXPECTED_CHARACTER: &str = "ZPL1001";
/// The accumulated mnemonic does not name any known command.
pub const PARSER_UNKNOWN_COMMAND: &str = "ZPL1002";
/// More argument slots were filled than the command defines.
pub const PARSER_TOO_MANY_ARGUMENTS: &str = "ZPL1003";
/// Input ended before the command's argument slots were filled.
pub const PARSER_TOO_FEW_ARGUMENTS: &str = "ZPL1004";
/// A strict delimiter slot did not receive the active delimiter.
pub const PARSER_EXPECTED_DELIMITER: &str = "ZPL1005";

/// Every diagnostic code defined by zplating, in ID order.
pub const ALL: &[&str] = &[
    PARSER_UNEXPECTED_CHARACTER,
    PARSER_UNKNOWN_COMMAND,
    PARSER_TOO_MANY_ARGUMENTS,
    PARSER_TOO_FEW_ARGUMENTS,
    PARSER_EXPECTED_DELIMITER,
];
