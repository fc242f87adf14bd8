use crate::error::{HookError, Result};

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// A compiled hook matcher. The config expresses all three forms as a single
/// string; the form is inferred structurally:
///
/// - leading `^`  — regex matched against the event's file path
/// - `/`, `*`, `?`, or `[` present — glob matched against the file path
/// - otherwise — `|`-separated tool-name alternation, exact per token
#[derive(Debug, Clone)]
pub enum Matcher {
    ToolNames(Vec<String>),
    PathGlob(glob::Pattern),
    PathRegex(regex::Regex),
}

impl Matcher {
    /// Compile a matcher string. Fails on invalid glob/regex syntax and on
    /// empty patterns (a hook that can never match is a config mistake).
    pub fn compile(pattern: &str) -> Result<Matcher> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(HookError::InvalidMatcher {
                pattern: pattern.to_string(),
                reason: "empty pattern".to_string(),
            });
        }

        if let Some(stripped) = pattern.strip_prefix('^') {
            // Re-anchor: the prefix is part of the regex, not a discriminator.
            let re = regex::Regex::new(&format!("^{stripped}")).map_err(|e| {
                HookError::InvalidMatcher {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                }
            })?;
            return Ok(Matcher::PathRegex(re));
        }

        if pattern.contains(['/', '*', '?', '[']) {
            let glob = glob::Pattern::new(pattern).map_err(|e| HookError::InvalidMatcher {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Matcher::PathGlob(glob));
        }

        let tokens: Vec<String> = pattern
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            return Err(HookError::InvalidMatcher {
                pattern: pattern.to_string(),
                reason: "no tool names in alternation".to_string(),
            });
        }
        Ok(Matcher::ToolNames(tokens))
    }

    /// Does this matcher apply to the given event context?
    ///
    /// Tool matchers require a tool name; path matchers require a file path.
    /// A missing field means "does not match", never an error.
    pub fn matches(&self, tool_name: Option<&str>, file_path: Option<&str>) -> bool {
        match self {
            Matcher::ToolNames(tokens) => match tool_name {
                Some(name) => tokens.iter().any(|t| t == name),
                None => false,
            },
            Matcher::PathGlob(pattern) => match file_path {
                Some(path) => pattern.matches(path),
                None => false,
            },
            Matcher::PathRegex(re) => match file_path {
                Some(path) => re.is_match(path),
                None => false,
            },
        }
    }

    /// The original pattern text, for reports and round-trip serialization.
    pub fn pattern(&self) -> String {
        match self {
            Matcher::ToolNames(tokens) => tokens.join("|"),
            Matcher::PathGlob(pattern) => pattern.as_str().to_string(),
            Matcher::PathRegex(re) => re.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
