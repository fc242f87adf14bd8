use crate::event::EventKind;
use crate::matcher::Matcher;

/// Timeout applied when a hook entry omits `timeoutMs`.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// HookDefinition
// ---------------------------------------------------------------------------

/// One configured validation rule, compiled and validated at registry build.
/// Immutable for the lifetime of its `Registry`.
#[derive(Debug, Clone)]
pub struct HookDefinition {
    /// Unique within the registry. Auto-derived from matcher + command when
    /// the config does not name the entry.
    pub name: String,
    pub event: EventKind,
    pub matcher: Matcher,
    /// Shell command, run as `sh -c <command>`.
    pub command: String,
    pub timeout_ms: u64,
    /// If false, a Block classification from this hook is downgraded to a
    /// warning by the aggregator.
    pub blocking: bool,
}

impl HookDefinition {
    /// Derive a stable name for an unnamed config entry.
    pub fn derived_name(event: EventKind, matcher: &str, command: &str) -> String {
        // First word of the command is usually the program; enough to make
        // the name readable in reports.
        let head = command.split_whitespace().next().unwrap_or("cmd");
        format!("{}:{}:{}", event.as_str(), matcher, head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_name_uses_event_matcher_and_program() {
        let name = HookDefinition::derived_name(
            EventKind::PreCommit,
            "Write|Edit",
            "scripts/check-env.sh --strict",
        );
        assert_eq!(name, "PreCommit:Write|Edit:scripts/check-env.sh");
    }

    #[test]
    fn derived_name_empty_command_falls_back() {
        let name = HookDefinition::derived_name(EventKind::PreToolUse, "*", "");
        assert_eq!(name, "PreToolUse:*:cmd");
    }
}
