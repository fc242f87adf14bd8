use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Lifecycle points at which hooks can fire. The on-disk config uses the
/// PascalCase names as keys under `hooks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PreToolUse,
    PostToolUse,
    PreCommit,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::PreToolUse,
            EventKind::PostToolUse,
            EventKind::PreCommit,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PreToolUse => "PreToolUse",
            EventKind::PostToolUse => "PostToolUse",
            EventKind::PreCommit => "PreCommit",
        }
    }

    /// Parse an event name from a CLI argument. Accepts PascalCase,
    /// kebab-case, and snake_case spellings.
    pub fn from_arg(s: &str) -> Option<EventKind> {
        match s.to_lowercase().as_str() {
            "pretooluse" | "pre-tool-use" | "pre_tool_use" => Some(EventKind::PreToolUse),
            "posttooluse" | "post-tool-use" | "post_tool_use" => Some(EventKind::PostToolUse),
            "precommit" | "pre-commit" | "pre_commit" => Some(EventKind::PreCommit),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = crate::error::HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PreToolUse" => Ok(EventKind::PreToolUse),
            "PostToolUse" => Ok(EventKind::PostToolUse),
            "PreCommit" => Ok(EventKind::PreCommit),
            _ => Err(crate::error::HookError::UnknownEvent(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// One runtime occurrence to be checked. Created by the host per occurrence,
/// consumed by a single dispatch, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Free-form context merged into the stdin payload's `tool_input`
    /// (e.g. the command text for Bash events).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl LifecycleEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            tool_name: None,
            file_path: None,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Build the JSON document written to each check's stdin:
    /// `{"hook_event_name": ..., "tool_name": ..., "tool_input": {...}}`.
    ///
    /// `file_path` lands inside `tool_input`; extra payload fields are merged
    /// alongside it (payload cannot overwrite `file_path`).
    pub fn stdin_payload(&self) -> serde_json::Value {
        let mut tool_input = serde_json::Map::new();
        if let serde_json::Value::Object(extra) = &self.payload {
            for (k, v) in extra {
                tool_input.insert(k.clone(), v.clone());
            }
        }
        if let Some(fp) = &self.file_path {
            tool_input.insert(
                "file_path".to_string(),
                serde_json::Value::String(fp.clone()),
            );
        }

        serde_json::json!({
            "hook_event_name": self.kind.as_str(),
            "tool_name": self.tool_name,
            "tool_input": tool_input,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_arg_accepts_all_spellings() {
        for s in ["PreToolUse", "pre-tool-use", "pre_tool_use", "PRETOOLUSE"] {
            assert_eq!(EventKind::from_arg(s), Some(EventKind::PreToolUse), "{s}");
        }
        for s in ["PostToolUse", "post-tool-use", "post_tool_use"] {
            assert_eq!(EventKind::from_arg(s), Some(EventKind::PostToolUse), "{s}");
        }
        for s in ["PreCommit", "pre-commit", "pre_commit"] {
            assert_eq!(EventKind::from_arg(s), Some(EventKind::PreCommit), "{s}");
        }
        assert_eq!(EventKind::from_arg("bogus"), None);
        assert_eq!(EventKind::from_arg(""), None);
    }

    #[test]
    fn from_str_is_exact() {
        assert_eq!(
            "PreCommit".parse::<EventKind>().unwrap(),
            EventKind::PreCommit
        );
        assert!("pre-commit".parse::<EventKind>().is_err());
    }

    #[test]
    fn stdin_payload_shape() {
        let event = LifecycleEvent::new(EventKind::PreToolUse)
            .with_tool("Write")
            .with_file("/project/src/main.rs");
        let payload = event.stdin_payload();
        assert_eq!(payload["hook_event_name"], "PreToolUse");
        assert_eq!(payload["tool_name"], "Write");
        assert_eq!(payload["tool_input"]["file_path"], "/project/src/main.rs");
    }

    #[test]
    fn stdin_payload_without_tool_or_file() {
        let event = LifecycleEvent::new(EventKind::PreCommit);
        let payload = event.stdin_payload();
        assert_eq!(payload["hook_event_name"], "PreCommit");
        assert!(payload["tool_name"].is_null());
        assert_eq!(payload["tool_input"], serde_json::json!({}));
    }

    #[test]
    fn stdin_payload_merges_extra_fields() {
        let event = LifecycleEvent::new(EventKind::PreToolUse)
            .with_tool("Bash")
            .with_payload(serde_json::json!({"command": "rm -rf /tmp/x"}));
        let payload = event.stdin_payload();
        assert_eq!(payload["tool_input"]["command"], "rm -rf /tmp/x");
    }

    #[test]
    fn payload_cannot_overwrite_file_path() {
        let event = LifecycleEvent::new(EventKind::PostToolUse)
            .with_file("/real/path.rs")
            .with_payload(serde_json::json!({"file_path": "/spoofed"}));
        let payload = event.stdin_payload();
        assert_eq!(payload["tool_input"]["file_path"], "/real/path.rs");
    }
}
