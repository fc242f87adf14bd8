use anyhow::Context;
use hookrunner_core::config::starter_config;
use hookrunner_core::io::write_if_missing;
use std::path::Path;

/// Write a starter config at the resolved path. Idempotent: an existing
/// config is left untouched.
pub fn run(config_path: &Path) -> anyhow::Result<i32> {
    let data = serde_json::to_string_pretty(&starter_config())?;
    let written = write_if_missing(config_path, data.as_bytes())
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    if written {
        println!("Wrote {}", config_path.display());
    } else {
        println!("{} already exists, leaving it alone", config_path.display());
    }
    Ok(0)
}
