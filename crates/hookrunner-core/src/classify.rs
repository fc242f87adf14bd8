use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved exit code recorded when a check is killed for exceeding its
/// timeout. Distinct from any real process exit code on Unix (0..=255).
pub const TIMEOUT_SENTINEL: i32 = -1;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Three-valued outcome of a single check, derived purely from its exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Pass,
    Warn,
    Block,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Pass => "pass",
            Classification::Warn => "warn",
            Classification::Block => "block",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit-code contract: 0 = pass, 2 = block, everything else (including the
/// timeout sentinel) is a non-blocking warning.
pub fn classify(exit_code: i32) -> Classification {
    match exit_code {
        0 => Classification::Pass,
        2 => Classification::Block,
        _ => Classification::Warn,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_pass() {
        assert_eq!(classify(0), Classification::Pass);
    }

    #[test]
    fn two_is_block() {
        assert_eq!(classify(2), Classification::Block);
    }

    #[test]
    fn timeout_sentinel_is_warn() {
        assert_eq!(classify(TIMEOUT_SENTINEL), Classification::Warn);
    }

    #[test]
    fn every_other_code_is_warn() {
        // Sweep the full byte range plus a sample of extreme values.
        for code in -256..=256 {
            if code == 0 || code == 2 {
                continue;
            }
            assert_eq!(classify(code), Classification::Warn, "code {code}");
        }
        for code in [i32::MIN, i32::MIN + 1, -70_000, 70_000, i32::MAX - 1, i32::MAX] {
            assert_eq!(classify(code), Classification::Warn, "code {code}");
        }
    }

    #[test]
    fn classification_serde_snake_case() {
        let json = serde_json::to_string(&Classification::Block).unwrap();
        assert_eq!(json, "\"block\"");
        let back: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Classification::Block);
    }
}
