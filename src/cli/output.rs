//! Output formatting for CLI commands.

use serde::Serialize;

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print a command result in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate a string to at most `max_len` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
    }

    impl CommandOutput for Sample {
        fn to_human(&self) -> String {
            format!("Sample: {}", self.name)
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer gift idea", 10), "a longe...");
        assert_eq!(truncate("crème brûlée set", 8), "crème...");
    }

    #[test]
    fn test_default_to_json() {
        let sample = Sample { name: "Ann".to_string() };
        assert_eq!(sample.to_json(), serde_json::json!({"name": "Ann"}));
        assert_eq!(sample.to_human(), "Sample: Ann");
    }
}
