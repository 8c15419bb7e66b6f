//! Probe results and their classification.

use serde::Serialize;

use crate::command::ProcessOutput;

/// Text shown in place of a probe's output when the probe did not succeed.
pub const UNKNOWN_MARKER: &str = "unknown";

/// How a probe's output is laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Single table cell; trailing whitespace is trimmed.
    Inline,
    /// Preformatted block; output is kept verbatim.
    Preformatted,
}

/// Outcome of running one probe command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeResult {
    /// The probe exited successfully; carries its (possibly empty) output.
    Ok(String),
    /// The probe could not be spawned or exited non-zero.
    Failed(String),
    /// The probe did not finish within the probe timeout.
    TimedOut,
}

impl ProbeResult {
    /// Interpret a finished process.
    #[must_use]
    pub fn from_output(output: &ProcessOutput, layout: Layout) -> Self {
        if !output.success() {
            return Self::Failed(output.failure_reason());
        }
        let text = match layout {
            Layout::Inline => output.stdout.trim_end().to_string(),
            Layout::Preformatted => output.stdout.clone(),
        };
        Self::Ok(text)
    }

    /// Text to render in the status column.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Ok(text) => text,
            Self::Failed(_) | Self::TimedOut => UNKNOWN_MARKER,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Classify the probe as a service state.
    #[must_use]
    pub fn health(&self) -> ServiceHealth {
        match self {
            Self::Ok(text) => ServiceHealth::classify(text),
            Self::Failed(_) | Self::TimedOut => ServiceHealth::Unknown,
        }
    }
}

/// Coarse service state derived from a status probe's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceHealth {
    Up,
    Down,
    Unknown,
}

impl ServiceHealth {
    /// `active` and `running` (systemd `ActiveState` / `SubState`) are up,
    /// any other text is down, no text is unknown.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Unknown;
        }
        if text.eq_ignore_ascii_case("active") || text.eq_ignore_ascii_case("running") {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// CSS class used by the dashboard.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn finished(exit_code: i32, stdout: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code: Some(exit_code),
            stdout: stdout.to_string(),
            stderr: String::new(),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn should_keep_output_verbatim_for_successful_probe() {
        let result = ProbeResult::from_output(&finished(0, "active\n"), Layout::Inline);
        assert_eq!(result, ProbeResult::Ok("active".to_string()));
        assert_eq!(result.display_text(), "active");
    }

    #[test]
    fn should_keep_trailing_newlines_for_preformatted_block() {
        let text = "Filesystem  Size\n/dev/sda1   1T\n";
        let result = ProbeResult::from_output(&finished(0, text), Layout::Preformatted);
        assert_eq!(result.display_text(), text);
    }

    #[test]
    fn should_render_empty_output_as_empty() {
        let result = ProbeResult::from_output(&finished(0, ""), Layout::Inline);
        assert_eq!(result.display_text(), "");
    }

    #[test]
    fn should_mark_non_zero_exit_as_unknown() {
        let result = ProbeResult::from_output(&finished(3, "inactive"), Layout::Inline);
        assert_eq!(
            result,
            ProbeResult::Failed("exit status 3: inactive".to_string())
        );
        assert_eq!(result.display_text(), UNKNOWN_MARKER);
        assert_eq!(result.health(), ServiceHealth::Unknown);
    }

    #[test]
    fn should_classify_running_and_active_as_up() {
        assert_eq!(ServiceHealth::classify("running"), ServiceHealth::Up);
        assert_eq!(ServiceHealth::classify("Active\n"), ServiceHealth::Up);
        assert_eq!(ServiceHealth::classify("failed"), ServiceHealth::Down);
        assert_eq!(ServiceHealth::classify("  "), ServiceHealth::Unknown);
    }

    #[test]
    fn should_serialize_with_kind_tag() {
        let json = serde_json::to_value(ProbeResult::TimedOut).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "timed_out"}));
        let json = serde_json::to_value(ProbeResult::Ok("42.0".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "ok", "detail": "42.0"}));
    }
}
