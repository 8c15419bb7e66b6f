//! Status service: collect every row of the dashboard.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hound_domain::catalog::{Catalog, StatusRow};
use hound_domain::probe::ProbeResult;
use hound_domain::report::{RowStatus, StatusReport};
use hound_domain::time::now;

use super::{Environment, millis};
use crate::ports::{CommandRunner, RunError};

/// Runs the catalog's probes and assembles a [`StatusReport`].
pub struct StatusService<R> {
    runner: Arc<R>,
    catalog: Arc<Catalog>,
    environment: Environment,
    timeout: Duration,
}

impl<R: CommandRunner + Send + Sync> StatusService<R> {
    /// Create a new service; each probe is bounded by `timeout`.
    pub fn new(
        runner: Arc<R>,
        catalog: Arc<Catalog>,
        environment: Environment,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            catalog,
            environment,
            timeout,
        }
    }

    /// Probe every row, one after the other, in catalog order.
    ///
    /// Never fails: a probe that cannot run or exits non-zero only turns its
    /// own row into the unknown marker.
    #[tracing::instrument(skip(self), fields(environment = %self.environment.name))]
    pub async fn collect(&self) -> StatusReport {
        let generated_at = now();
        let mut rows = Vec::with_capacity(self.catalog.rows().len());
        for row in self.catalog.rows() {
            rows.push(self.probe(row).await);
        }
        tracing::debug!(rows = rows.len(), "status collected");
        StatusReport {
            environment: self.environment.name.clone(),
            generated_at,
            rows,
        }
    }

    async fn probe(&self, row: &StatusRow) -> RowStatus {
        let command = row.probe.command(&self.environment.script_dir);
        let started = Instant::now();
        let result = match self.runner.run(&command, self.timeout).await {
            Ok(output) => ProbeResult::from_output(&output, row.layout),
            Err(RunError::TimedOut { .. }) => ProbeResult::TimedOut,
            Err(err) => ProbeResult::Failed(err.reason()),
        };
        match &result {
            ProbeResult::Ok(_) => {}
            ProbeResult::Failed(reason) => {
                tracing::warn!(row = %row.label, %command, %reason, "probe failed");
            }
            ProbeResult::TimedOut => {
                tracing::warn!(
                    row = %row.label,
                    %command,
                    timeout = ?self.timeout,
                    "probe timed out"
                );
            }
        }
        RowStatus::new(row, result, millis(started.elapsed()))
    }
}
