//! Event dispatch: match hooks, run them concurrently, return results in
//! declaration order.

use crate::event::LifecycleEvent;
use crate::executor::{self, CheckResult};
use crate::registry::Registry;

/// Run every hook matching `event` and return one `CheckResult` per hook.
///
/// Matched checks run concurrently — they share no mutable state — and
/// `join_all` returns results in input order, so the output order is the
/// hooks' declaration order regardless of which check finishes first.
///
/// An empty match set returns immediately without touching the runtime's
/// process machinery; this is the common case and must stay cheap.
pub async fn dispatch(registry: &Registry, event: &LifecycleEvent) -> Vec<CheckResult> {
    let matched = registry.query(
        event.kind,
        event.tool_name.as_deref(),
        event.file_path.as_deref(),
    );
    if matched.is_empty() {
        return Vec::new();
    }

    tracing::debug!(
        event = %event.kind,
        matched = matched.len(),
        "dispatching checks"
    );

    futures::future::join_all(matched.iter().map(|hook| executor::execute(hook, event))).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
