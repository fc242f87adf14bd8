use crate::classify::Classification;
use crate::error::{HookError, Result};
use crate::executor::CheckResult;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Overall
// ---------------------------------------------------------------------------

/// The combined verdict for one lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overall {
    Allow,
    AllowWithWarnings,
    Deny,
}

impl Overall {
    pub fn as_str(self) -> &'static str {
        match self {
            Overall::Allow => "allow",
            Overall::AllowWithWarnings => "allow_with_warnings",
            Overall::Deny => "deny",
        }
    }
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AggregateDecision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateDecision {
    pub overall: Overall,
    pub results: Vec<CheckResult>,
}

/// Reduce check results into one decision.
///
/// Deny iff some result is a Block from a hook configured `blocking: true`.
/// A Block from a non-blocking hook is deliberately downgraded to a warning
/// so configuration can express advisory-only checks. Any other non-Pass
/// result yields AllowWithWarnings.
///
/// A result naming a hook the registry doesn't know is a programming fault
/// upstream, not a decision input — it aborts with `Inconsistency` rather
/// than risking a wrong verdict.
pub fn aggregate(registry: &Registry, results: Vec<CheckResult>) -> Result<AggregateDecision> {
    let mut overall = Overall::Allow;

    for result in &results {
        let hook = registry.get(&result.hook_name).ok_or_else(|| {
            HookError::Inconsistency(format!(
                "check result references unknown hook '{}'",
                result.hook_name
            ))
        })?;

        match result.classification {
            Classification::Pass => {}
            Classification::Block if hook.blocking => overall = Overall::Deny,
            _ => {
                if overall != Overall::Deny {
                    overall = Overall::AllowWithWarnings;
                }
            }
        }
    }

    Ok(AggregateDecision { overall, results })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
