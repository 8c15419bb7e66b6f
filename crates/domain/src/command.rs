//! External process description and captured result.
//!
//! The domain never spawns anything; it only describes *what* to run
//! ([`CommandSpec`]) and *what came back* ([`ProcessOutput`]). Spawning is the
//! job of a `CommandRunner` adapter.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

/// A program and its fixed argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// Program path or name resolved through `PATH`.
    pub program: String,
    /// Arguments, passed as-is (no shell interpretation).
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// A script living in `script_dir`.
    #[must_use]
    pub fn script(script_dir: &Path, script: &str) -> Self {
        Self::new(script_dir.join(script).to_string_lossy().into_owned())
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Everything captured from one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock time between spawn and exit.
    pub duration: Duration,
}

impl ProcessOutput {
    /// `true` when the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable reason for a non-successful exit.
    ///
    /// Carries stderr, or stdout when stderr is empty: `systemctl is-active`
    /// prints `inactive` and exits 3.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        };
        let detail = match self.stderr.trim() {
            "" => self.stdout.trim(),
            stderr => stderr,
        };
        if detail.is_empty() {
            status
        } else {
            format!("{status}: {detail}")
        }
    }
}
