//! Action service: authorize and dispatch operator actions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;

use hound_domain::action::{ActionOutcome, ActionRequest, ActionStatus};
use hound_domain::catalog::{ActionDefinition, Catalog};
use hound_domain::error::{ForbiddenError, HoundError};
use hound_domain::id::ActionId;
use hound_domain::time::now;

use super::{Environment, millis};
use crate::ports::{CommandRunner, RunError};

/// What to do with an action command's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Wait for the command and report success or failure to the caller.
    #[default]
    Report,
    /// Spawn the command and return immediately; the result is only logged.
    FireAndForget,
}

/// Tuning knobs for [`ActionService`].
#[derive(Debug, Clone)]
pub struct ActionSettings {
    /// Upper bound for one action command.
    pub timeout: Duration,
    pub policy: FailurePolicy,
    /// Shared secret required to trigger actions; `None` disables them.
    pub token: Option<String>,
}

/// Runs the single command behind each requested action.
///
/// Stateless: nothing tracks whether a service is already restarting, and
/// two requests for the same action run the command twice.
pub struct ActionService<R> {
    runner: Arc<R>,
    catalog: Arc<Catalog>,
    environment: Environment,
    settings: ActionSettings,
}

impl<R: CommandRunner + Send + Sync + 'static> ActionService<R> {
    /// Create a new service dispatching through `runner`.
    pub fn new(
        runner: Arc<R>,
        catalog: Arc<Catalog>,
        environment: Environment,
        settings: ActionSettings,
    ) -> Self {
        Self {
            runner,
            catalog,
            environment,
            settings,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Check a presented token against the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`HoundError::Forbidden`] when no token is configured, none was
    /// presented, or the presented one does not match.
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), HoundError> {
        let Some(expected) = self.settings.token.as_deref() else {
            return Err(ForbiddenError::ActionsDisabled.into());
        };
        let Some(presented) = presented.filter(|token| !token.is_empty()) else {
            return Err(ForbiddenError::MissingToken.into());
        };
        if !tokens_match(expected.as_bytes(), presented.as_bytes()) {
            return Err(ForbiddenError::InvalidToken.into());
        }
        Ok(())
    }

    /// Run one command per requested action, in request order.
    ///
    /// Params not in the catalog are skipped; [`ActionRequest`] already
    /// filters them, so this only matters for hand-built requests.
    #[tracing::instrument(skip(self, request), fields(actions = request.len()))]
    pub async fn dispatch(&self, request: &ActionRequest) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::with_capacity(request.len());
        for param in request.params() {
            let Some(action) = self.catalog.action(param) else {
                tracing::debug!(%param, "ignoring unrecognized action");
                continue;
            };
            outcomes.push(self.run(action).await);
        }
        outcomes
    }

    async fn run(&self, action: &ActionDefinition) -> ActionOutcome {
        let command = action
            .kind
            .command(&self.environment.script_dir, &self.environment.name);
        let id = ActionId::new();
        let started_at = now();
        let line = command.to_string();
        tracing::info!(%id, param = %action.param, command = %line, "dispatching action");

        let runner = Arc::clone(&self.runner);
        let timeout = self.settings.timeout;
        let started = Instant::now();
        // The command owns its task: dropping the caller (client disconnect,
        // request timeout) must not kill a restart halfway through.
        let task = tokio::spawn(async move { runner.run(&command, timeout).await });

        if self.settings.policy == FailurePolicy::FireAndForget {
            let param = action.param.clone();
            tokio::spawn(async move {
                match task.await {
                    Ok(Ok(output)) if output.success() => {
                        tracing::info!(%id, %param, "action succeeded");
                    }
                    Ok(Ok(output)) => {
                        let reason = output.failure_reason();
                        tracing::warn!(%id, %param, %reason, "action failed");
                    }
                    Ok(Err(err)) => tracing::warn!(%id, %param, error = %err, "action failed"),
                    Err(err) => tracing::error!(%id, %param, error = %err, "action task failed"),
                }
            });
            return ActionOutcome {
                id,
                param: action.param.clone(),
                command: line,
                status: ActionStatus::Dispatched,
                started_at,
                duration_ms: 0,
                exit_code: None,
            };
        }

        let (status, exit_code) = match task.await {
            Ok(Ok(output)) if output.success() => (ActionStatus::Succeeded, output.exit_code),
            Ok(Ok(output)) => (
                ActionStatus::Failed {
                    reason: output.failure_reason(),
                },
                output.exit_code,
            ),
            Ok(Err(RunError::TimedOut { .. })) => (ActionStatus::TimedOut, None),
            Ok(Err(err)) => (ActionStatus::Failed { reason: err.reason() }, None),
            Err(err) => {
                tracing::error!(%id, param = %action.param, error = %err, "action task failed");
                (
                    ActionStatus::Failed {
                        reason: "action task failed".to_string(),
                    },
                    None,
                )
            }
        };
        if status.is_failure() {
            tracing::warn!(%id, param = %action.param, status = status.label(), "action failed");
        } else {
            tracing::info!(%id, param = %action.param, "action succeeded");
        }

        ActionOutcome {
            id,
            param: action.param.clone(),
            command: line,
            status,
            started_at,
            duration_ms: millis(started.elapsed()),
            exit_code,
        }
    }
}

/// Compare two secrets without returning early on the first mismatch.
fn tokens_match(expected: &[u8], presented: &[u8]) -> bool {
    if expected.len() != presented.len() {
        return false;
    }
    expected
        .iter()
        .zip(presented)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
