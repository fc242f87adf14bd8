use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hookrunner_core::config::{HooksFile, WarnLevel};
use hookrunner_core::event::EventKind;
use hookrunner_core::registry::Registry;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the config for hard errors and common mistakes
    Validate,

    /// Show the validated hook registry
    Show,
}

pub fn run(config_path: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<i32> {
    match subcmd {
        ConfigSubcommand::Validate => validate(config_path, json),
        ConfigSubcommand::Show => show(config_path, json),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config_path: &Path, json: bool) -> anyhow::Result<i32> {
    let file = HooksFile::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let warnings = file.validate();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        let registry = Registry::from_config(&file)?;
        println!("config OK ({} hooks)", registry.len());
    } else {
        for w in &warnings {
            let level = match w.level {
                WarnLevel::Error => "error",
                WarnLevel::Warning => "warning",
            };
            println!("{level}: {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    anyhow::ensure!(!has_errors, "config has errors");
    Ok(0)
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config_path: &Path, json: bool) -> anyhow::Result<i32> {
    let registry = Registry::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    if json {
        print_json(&registry.to_config())?;
        return Ok(0);
    }

    let mut rows = Vec::new();
    for event in EventKind::all() {
        for hook in registry.hooks_for(*event) {
            rows.push(vec![
                hook.name.clone(),
                event.as_str().to_string(),
                hook.matcher.pattern(),
                hook.command.clone(),
                hook.timeout_ms.to_string(),
                if hook.blocking { "yes" } else { "no" }.to_string(),
            ]);
        }
    }

    if rows.is_empty() {
        println!("No hooks configured. Run: hookrunner init");
        return Ok(0);
    }

    print_table(
        &["NAME", "EVENT", "MATCHER", "COMMAND", "TIMEOUT_MS", "BLOCKING"],
        rows,
    );
    Ok(0)
}
