use hookrunner_core::aggregate::{AggregateDecision, Overall};
use hookrunner_core::classify::Classification;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Text rendering of a decision: every non-Pass result with its hook name
/// and captured stderr, then the overall verdict.
pub fn render_decision(event_name: &str, decision: &AggregateDecision) {
    for result in &decision.results {
        if result.classification == Classification::Pass {
            continue;
        }
        println!(
            "[{}] {} (exit {}, {}ms)",
            result.classification, result.hook_name, result.exit_code, result.duration_ms
        );
        let reason = if result.stderr.trim().is_empty() {
            &result.stdout
        } else {
            &result.stderr
        };
        for line in reason.trim().lines() {
            println!("    {line}");
        }
    }

    println!("Event:    {event_name}");
    println!("Checks:   {}", decision.results.len());
    println!("Overall:  {}", decision.overall);
    if decision.overall == Overall::Deny {
        println!("Denied — fix the blocking check(s) above and retry.");
    }
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    // Print header
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    // Print separator
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    // Print rows
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}
