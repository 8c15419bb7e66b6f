//! Status report: one collection pass over the catalog.

use serde::Serialize;

use crate::catalog::StatusRow;
use crate::probe::{Layout, ProbeResult, ServiceHealth};
use crate::time::Timestamp;

/// Collected status of one catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStatus {
    pub label: String,
    pub layout: Layout,
    pub result: ProbeResult,
    /// What the dashboard prints: probe output plus suffix, or the unknown marker.
    pub text: String,
    /// Only set for inline rows without a unit suffix (service and firewall rows).
    pub health: Option<ServiceHealth>,
    pub action_param: Option<String>,
    pub duration_ms: u64,
}

impl RowStatus {
    /// Combine a row definition with its probe result.
    #[must_use]
    pub fn new(row: &StatusRow, result: ProbeResult, duration_ms: u64) -> Self {
        let text = match (&result, &row.suffix) {
            (ProbeResult::Ok(output), Some(suffix)) => format!("{output}{suffix}"),
            _ => result.display_text().to_string(),
        };
        let health = (row.layout == Layout::Inline && row.suffix.is_none())
            .then(|| result.health());
        Self {
            label: row.label.clone(),
            layout: row.layout,
            result,
            text,
            health,
            action_param: row.action_param.clone(),
            duration_ms,
        }
    }

    #[must_use]
    pub fn is_preformatted(&self) -> bool {
        self.layout == Layout::Preformatted
    }
}

/// Everything shown on one page load.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub environment: String,
    pub generated_at: Timestamp,
    pub rows: Vec<RowStatus>,
}

impl StatusReport {
    /// Rows that failed to produce output.
    pub fn failed_rows(&self) -> impl Iterator<Item = &RowStatus> {
        self.rows.iter().filter(|row| !row.result.is_ok())
    }
}
