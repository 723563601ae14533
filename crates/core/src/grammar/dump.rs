use super::command::Command;

/// Serialize commands to a pretty-printed JSON array.
pub fn to_pretty_json(commands: &[Command]) -> String {
    serde_json::to_string_pretty(commands).expect("Command serialization cannot fail")
}
