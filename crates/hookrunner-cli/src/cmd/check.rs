use crate::output::{print_json, render_decision};
use anyhow::Context;
use chrono::{DateTime, Utc};
use hookrunner_core::aggregate::{aggregate, AggregateDecision, Overall};
use hookrunner_core::dispatch::dispatch;
use hookrunner_core::event::{EventKind, LifecycleEvent};
use hookrunner_core::registry::Registry;
use serde::Serialize;
use std::path::Path;

/// JSON report wrapper: the decision plus the event it answers.
#[derive(Serialize)]
struct Report<'a> {
    event: &'a str,
    checked_at: DateTime<Utc>,
    #[serde(flatten)]
    decision: &'a AggregateDecision,
}

pub fn run(
    config_path: &Path,
    event_name: &str,
    tool: Option<&str>,
    file: Option<&str>,
    payload: Option<&str>,
    json: bool,
) -> anyhow::Result<i32> {
    let kind = EventKind::from_arg(event_name)
        .with_context(|| format!("unknown event '{event_name}' (expected PreToolUse, PostToolUse, or PreCommit)"))?;

    let payload_value = match payload {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--payload is not valid JSON")?;
            anyhow::ensure!(value.is_object(), "--payload must be a JSON object");
            value
        }
        None => serde_json::Value::Null,
    };

    let registry = Registry::load(config_path)
        .with_context(|| format!("failed to load hooks config from {}", config_path.display()))?;

    let mut event = LifecycleEvent::new(kind).with_payload(payload_value);
    if let Some(tool) = tool {
        event = event.with_tool(tool);
    }
    if let Some(file) = file {
        event = event.with_file(file);
    }

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let decision = rt.block_on(async {
        let results = dispatch(&registry, &event).await;
        aggregate(&registry, results)
    })?;

    if json {
        print_json(&Report {
            event: kind.as_str(),
            checked_at: Utc::now(),
            decision: &decision,
        })?;
    } else {
        render_decision(kind.as_str(), &decision);
    }

    Ok(if decision.overall == Overall::Deny { 1 } else { 0 })
}
