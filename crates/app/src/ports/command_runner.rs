//! Command runner port: spawn an external process and capture its output.

use std::future::Future;
use std::time::Duration;

use hound_domain::command::{CommandSpec, ProcessOutput};

/// Why a command produced no [`ProcessOutput`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The program could not be started (missing, not executable, …).
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process was started but waiting on it failed.
    #[error("failed to wait for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not exit within the allowed time and was killed.
    #[error("`{program}` timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

impl RunError {
    /// Short reason suitable for display next to a row or in a banner.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Spawn { source, .. } => format!("spawn failed: {source}"),
            Self::Wait { source, .. } => format!("wait failed: {source}"),
            Self::TimedOut { timeout, .. } => format!("timed out after {}s", timeout.as_secs()),
        }
    }
}

/// Runs external commands.
///
/// Implementations must kill the child when `timeout` elapses and must never
/// interpret `command.args` through a shell.
pub trait CommandRunner {
    /// Run `command` to completion, bounded by `timeout`.
    fn run(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProcessOutput, RunError>> + Send;
}

impl<T: CommandRunner + Send + Sync> CommandRunner for std::sync::Arc<T> {
    fn run(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProcessOutput, RunError>> + Send {
        (**self).run(command, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_timeout_in_seconds() {
        let err = RunError::TimedOut {
            program: "diskinfo.sh".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.reason(), "timed out after 5s");
        assert_eq!(err.to_string(), "`diskinfo.sh` timed out after 5s");
    }

    #[test]
    fn should_describe_spawn_failure_with_io_error() {
        let err = RunError::Spawn {
            program: "missing.sh".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "failed to spawn `missing.sh`");
        assert!(err.reason().starts_with("spawn failed: "));
    }
}
