//! # hound-adapter-process-tokio
//!
//! Driven adapter implementing the `CommandRunner` port on top of
//! [`tokio::process`].
//!
//! ## Behaviour
//! - Programs are spawned directly with their argument list; nothing goes
//!   through a shell unless the command itself is `sh -c …`.
//! - stdin is closed, stdout and stderr are captured in full.
//! - When the timeout elapses the child is killed (`kill_on_drop`) and
//!   [`RunError::TimedOut`] is returned.
//! - Output is decoded lossily, so a probe printing invalid UTF-8 still
//!   shows up.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `hound-app` and `hound-domain`.

use std::future::Future;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;

use hound_app::ports::{CommandRunner, RunError};
use hound_domain::command::{CommandSpec, ProcessOutput};

/// [`CommandRunner`] backed by `tokio::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    async fn execute(command: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunError> {
        let started = Instant::now();
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| RunError::TimedOut {
                program: command.program.clone(),
                timeout,
            })?
            .map_err(|source| RunError::Wait {
                program: command.program.clone(),
                source,
            })?;

        let output = ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: started.elapsed(),
        };
        tracing::trace!(
            %command,
            exit_code = ?output.exit_code,
            duration = ?output.duration,
            "command finished"
        );
        Ok(output)
    }
}

impl CommandRunner for TokioCommandRunner {
    fn run(
        &self,
        command: &CommandSpec,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProcessOutput, RunError>> + Send {
        Self::execute(command, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn should_capture_stdout_of_successful_command() {
        let output = TokioCommandRunner::new()
            .run(&sh("echo active"), Duration::from_secs(5))
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "active\n");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn should_report_non_zero_exit_code_and_stderr() {
        let output = TokioCommandRunner::new()
            .run(&sh("echo broken >&2; exit 3"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "broken\n");
        assert_eq!(output.failure_reason(), "exit status 3: broken");
    }

    #[tokio::test]
    async fn should_pass_arguments_without_shell_expansion() {
        let cmd = CommandSpec::new("echo").arg("$HOME; rm -rf /");
        let output = TokioCommandRunner::new()
            .run(&cmd, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(output.stdout, "$HOME; rm -rf /\n");
    }

    #[tokio::test]
    async fn should_fail_to_spawn_missing_program() {
        let cmd = CommandSpec::new("/nonexistent/bashScripts/servicestatus.sh").arg("nginx");
        let result = TokioCommandRunner::new()
            .run(&cmd, Duration::from_secs(5))
            .await;

        assert!(matches!(result, Err(RunError::Spawn { .. })));
    }

    #[tokio::test]
    async fn should_time_out_hung_command() {
        let started = Instant::now();
        let result = TokioCommandRunner::new()
            .run(&CommandSpec::new("sleep").arg("10"), Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(RunError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
