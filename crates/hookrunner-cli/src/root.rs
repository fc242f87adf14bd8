use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "hooks.json";
const LEGACY_CONFIG_FILE: &str = ".claude/settings.json";

/// Resolve the hooks config path.
///
/// Priority:
/// 1. `--config` flag / `HOOKRUNNER_CONFIG` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `hooks.json`
/// 3. Walk upward from `cwd` looking for `.claude/settings.json` (legacy
///    location; same schema under its `hooks` key)
/// 4. Fall back to `<cwd>/hooks.json`
pub fn resolve_config(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Walk upward looking for hooks.json
    let mut dir = cwd.clone();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    // Walk upward looking for .claude/settings.json
    let mut dir = cwd.clone();
    loop {
        let candidate = dir.join(LEGACY_CONFIG_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_config_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        let result = resolve_config(Some(&path));
        assert_eq!(result, path);
    }

    #[test]
    fn explicit_config_wins_even_if_missing() {
        // resolve does not check existence for explicit paths; load reports
        // the missing file with its real name
        let result = resolve_config(Some(Path::new("/no/such/hooks.json")));
        assert_eq!(result, PathBuf::from("/no/such/hooks.json"));
    }
}
