use crate::config::{CommandHook, CommandHookKind, HooksFile, MatcherGroup};
use crate::error::{HookError, Result};
use crate::event::EventKind;
use crate::hook::{HookDefinition, DEFAULT_TIMEOUT_MS};
use crate::matcher::Matcher;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The validated, immutable set of hook definitions for one process.
///
/// Built once from a `HooksFile`; reload means building a fresh `Registry`
/// and swapping the `Arc` that holds it. There is deliberately no mutation
/// API, so in-flight dispatches always observe a consistent snapshot.
#[derive(Debug)]
pub struct Registry {
    by_event: HashMap<EventKind, Vec<HookDefinition>>,
}

impl Registry {
    pub fn load(path: &Path) -> Result<Registry> {
        let file = HooksFile::load(path)?;
        Self::from_config(&file)
    }

    /// Validate and compile a parsed config into a registry. Pure: no
    /// command is executed, no filesystem access.
    pub fn from_config(file: &HooksFile) -> Result<Registry> {
        let mut by_event: HashMap<EventKind, Vec<HookDefinition>> = HashMap::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        for (event_key, groups) in &file.hooks {
            let event: EventKind = event_key.parse()?;

            for group in groups {
                let matcher = Matcher::compile(&group.matcher)?;

                for hook in &group.hooks {
                    let name = match &hook.name {
                        Some(n) => n.clone(),
                        None => HookDefinition::derived_name(event, &group.matcher, &hook.command),
                    };

                    if hook.command.trim().is_empty() {
                        return Err(HookError::EmptyCommand(name));
                    }

                    let timeout_ms = hook.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
                    if timeout_ms == 0 {
                        return Err(HookError::InvalidTimeout {
                            name,
                            timeout_ms: 0,
                        });
                    }

                    if !seen_names.insert(name.clone()) {
                        return Err(HookError::DuplicateHookName(name));
                    }

                    by_event.entry(event).or_default().push(HookDefinition {
                        name,
                        event,
                        matcher: matcher.clone(),
                        command: hook.command.clone(),
                        timeout_ms,
                        blocking: group.blocking,
                    });
                }
            }
        }

        Ok(Registry { by_event })
    }

    /// All hooks registered for `event`, in declaration order.
    pub fn hooks_for(&self, event: EventKind) -> &[HookDefinition] {
        self.by_event
            .get(&event)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Hooks for `event` whose matcher applies to the given tool name or
    /// file path, in declaration order. No match is an empty vec, not an
    /// error.
    pub fn query(
        &self,
        event: EventKind,
        tool_name: Option<&str>,
        file_path: Option<&str>,
    ) -> Vec<&HookDefinition> {
        self.hooks_for(event)
            .iter()
            .filter(|h| h.matcher.matches(tool_name, file_path))
            .collect()
    }

    /// Look up a definition by name, across all events.
    pub fn get(&self, name: &str) -> Option<&HookDefinition> {
        self.by_event
            .values()
            .flat_map(|v| v.iter())
            .find(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_event.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize back to the on-disk shape. One matcher group per definition,
    /// names made explicit, so `from_config(to_config())` yields a registry
    /// with identical `query` results.
    pub fn to_config(&self) -> HooksFile {
        let mut hooks = BTreeMap::new();
        for event in EventKind::all() {
            let defs = self.hooks_for(*event);
            if defs.is_empty() {
                continue;
            }
            let groups = defs
                .iter()
                .map(|d| MatcherGroup {
                    matcher: d.matcher.pattern(),
                    blocking: d.blocking,
                    hooks: vec![CommandHook {
                        kind: CommandHookKind::Command,
                        name: Some(d.name.clone()),
                        command: d.command.clone(),
                        timeout_ms: Some(d.timeout_ms),
                    }],
                })
                .collect();
            hooks.insert(event.as_str().to_string(), groups);
        }
        HooksFile { hooks }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
