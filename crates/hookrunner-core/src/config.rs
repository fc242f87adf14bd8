use crate::error::{HookError, Result};
use crate::event::EventKind;
use crate::hook::DEFAULT_TIMEOUT_MS;
use crate::matcher::Matcher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// On-disk model
// ---------------------------------------------------------------------------

/// A single command entry inside a matcher group. `type` is always
/// `"command"` today; the tag keeps room for in-process checks later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandHook {
    #[serde(rename = "type")]
    pub kind: CommandHookKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub command: String,
    #[serde(
        rename = "timeoutMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandHookKind {
    Command,
}

/// A matcher group: one pattern guarding one or more command entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherGroup {
    pub matcher: String,
    #[serde(default)]
    pub blocking: bool,
    pub hooks: Vec<CommandHook>,
}

/// Top-level document: `{ "hooks": { "<EventName>": [ <MatcherGroup>, ... ] } }`.
///
/// Event keys stay as strings here so an unknown event name surfaces as a
/// `HookError::UnknownEvent` during registry build instead of an opaque
/// serde error. Unknown top-level keys are ignored, which lets the same
/// loader read a full `.claude/settings.json` and use only its `hooks` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksFile {
    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<MatcherGroup>>,
}

impl HooksFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HookError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::load_str(&data)
    }

    pub fn load_str(data: &str) -> Result<Self> {
        let file: HooksFile = serde_json::from_str(data)?;
        Ok(file)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// Advisory validation: everything the registry build would reject is
    /// reported at Error level, plus softer Warning-level findings the build
    /// accepts (suspiciously long timeouts, empty event lists).
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut seen_names = std::collections::HashSet::new();

        for (event_key, groups) in &self.hooks {
            if event_key.parse::<EventKind>().is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("unknown event '{event_key}' in hooks config"),
                });
            }

            if groups.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("event '{event_key}' has no matcher groups"),
                });
            }

            for group in groups {
                if let Err(e) = Matcher::compile(&group.matcher) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: e.to_string(),
                    });
                }

                for hook in &group.hooks {
                    let name = match &hook.name {
                        Some(n) => n.clone(),
                        None => {
                            let head = hook.command.split_whitespace().next().unwrap_or("cmd");
                            format!("{event_key}:{}:{head}", group.matcher)
                        }
                    };
                    if !seen_names.insert(name.clone()) {
                        warnings.push(ConfigWarning {
                            level: WarnLevel::Error,
                            message: format!("duplicate hook name '{name}'"),
                        });
                    }

                    if hook.command.trim().is_empty() {
                        warnings.push(ConfigWarning {
                            level: WarnLevel::Error,
                            message: format!(
                                "hook matching '{}' on '{}' has an empty command",
                                group.matcher, event_key
                            ),
                        });
                    }
                    match hook.timeout_ms {
                        Some(0) => warnings.push(ConfigWarning {
                            level: WarnLevel::Error,
                            message: format!(
                                "hook matching '{}' on '{}' has timeoutMs=0",
                                group.matcher, event_key
                            ),
                        }),
                        Some(t) if t > 600_000 => warnings.push(ConfigWarning {
                            level: WarnLevel::Warning,
                            message: format!(
                                "hook matching '{}' on '{}' has timeoutMs={} (>10min is unusual)",
                                group.matcher, event_key, t
                            ),
                        }),
                        _ => {}
                    }
                }
            }
        }

        warnings
    }
}

/// Starter config written by `hookrunner init`: one non-blocking example hook
/// per event, each a no-op that passes.
pub fn starter_config() -> HooksFile {
    let mut hooks = BTreeMap::new();
    for kind in EventKind::all() {
        hooks.insert(
            kind.as_str().to_string(),
            vec![MatcherGroup {
                matcher: match kind {
                    EventKind::PreToolUse | EventKind::PostToolUse => "Write|Edit".to_string(),
                    EventKind::PreCommit => "**/*".to_string(),
                },
                blocking: false,
                hooks: vec![CommandHook {
                    kind: CommandHookKind::Command,
                    name: Some(format!("example-{}", kind.as_str().to_lowercase())),
                    command: "true".to_string(),
                    timeout_ms: Some(DEFAULT_TIMEOUT_MS),
                }],
            }],
        );
    }
    HooksFile { hooks }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "hooks": {
            "PreCommit": [
                {
                    "matcher": "**/*",
                    "blocking": true,
                    "hooks": [
                        { "type": "command", "command": "scripts/check-env.sh", "timeoutMs": 5000 }
                    ]
                }
            ],
            "PreToolUse": [
                {
                    "matcher": "Write|Edit",
                    "hooks": [
                        { "type": "command", "name": "no-secrets", "command": "scripts/no-secrets.sh" }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn parses_sample() {
        let file = HooksFile::load_str(SAMPLE).unwrap();
        assert_eq!(file.hooks.len(), 2);
        let pre_commit = &file.hooks["PreCommit"][0];
        assert!(pre_commit.blocking);
        assert_eq!(pre_commit.hooks[0].timeout_ms, Some(5000));
        let pre_tool = &file.hooks["PreToolUse"][0];
        assert!(!pre_tool.blocking, "blocking defaults to false");
        assert_eq!(pre_tool.hooks[0].name.as_deref(), Some("no-secrets"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(HooksFile::load_str("{ not json").is_err());
    }

    #[test]
    fn unknown_entry_field_rejected() {
        let data = r#"{"hooks":{"PreCommit":[{"matcher":"*","blokcing":true,"hooks":[]}]}}"#;
        assert!(HooksFile::load_str(data).is_err(), "typo in field name should be rejected");
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        // A full .claude/settings.json carries more than hooks
        let data = r#"{"permissions":{"allow":["Bash"]},"hooks":{"PreCommit":[]}}"#;
        let file = HooksFile::load_str(data).unwrap();
        assert!(file.hooks.contains_key("PreCommit"));
    }

    #[test]
    fn missing_hooks_key_is_empty() {
        let file = HooksFile::load_str("{}").unwrap();
        assert!(file.hooks.is_empty());
    }

    #[test]
    fn validate_flags_unknown_event() {
        let data = r#"{"hooks":{"OnSave":[]}}"#;
        let file = HooksFile::load_str(data).unwrap();
        let warnings = file.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("OnSave")));
    }

    #[test]
    fn validate_flags_empty_command_and_zero_timeout() {
        let data = r#"{"hooks":{"PreCommit":[{"matcher":"*","hooks":[
            {"type":"command","command":"  "},
            {"type":"command","command":"true","timeoutMs":0}
        ]}]}}"#;
        let file = HooksFile::load_str(data).unwrap();
        let errors: Vec<_> = file
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .collect();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn validate_flags_duplicate_names() {
        let data = r#"{"hooks":{"PreCommit":[{"matcher":"*","hooks":[
            {"type":"command","name":"lint","command":"npm run lint"},
            {"type":"command","name":"lint","command":"npm run lint -- --fix"}
        ]}]}}"#;
        let file = HooksFile::load_str(data).unwrap();
        let warnings = file.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("duplicate")));
    }

    #[test]
    fn validate_warns_on_long_timeout() {
        let data = r#"{"hooks":{"PreCommit":[{"matcher":"*","hooks":[
            {"type":"command","command":"true","timeoutMs":900000}
        ]}]}}"#;
        let file = HooksFile::load_str(data).unwrap();
        let warnings = file.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
    }

    #[test]
    fn validate_clean_config_is_quiet() {
        let file = HooksFile::load_str(SAMPLE).unwrap();
        assert!(file.validate().is_empty());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");
        let file = HooksFile::load_str(SAMPLE).unwrap();
        file.save(&path).unwrap();
        let reloaded = HooksFile::load(&path).unwrap();
        assert_eq!(reloaded, file);
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let err = HooksFile::load(Path::new("/nonexistent/hooks.json")).unwrap_err();
        assert!(matches!(err, HookError::ConfigNotFound(_)));
    }

    #[test]
    fn starter_config_is_valid() {
        let file = starter_config();
        assert_eq!(file.hooks.len(), EventKind::all().len());
        assert!(file.validate().is_empty());
    }
}
