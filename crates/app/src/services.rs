//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod action_service;
pub mod status_service;

use std::path::PathBuf;
use std::time::Duration;

/// The environment a console instance manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Name passed to the edit-lock scripts and shown in the page title.
    pub name: String,
    /// Directory holding the probe and action scripts.
    pub script_dir: PathBuf,
}

impl Environment {
    #[must_use]
    pub fn new(name: impl Into<String>, script_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            script_dir: script_dir.into(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted [`CommandRunner`] shared by the service tests.

    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use hound_domain::command::{CommandSpec, ProcessOutput};

    use crate::ports::{CommandRunner, RunError};

    /// Canned reply for commands whose command line ends with a given suffix.
    #[derive(Clone)]
    pub enum Reply {
        Exit(i32, &'static str),
        /// Succeed after a delay, then record the command as finished.
        Slow(Duration),
        Missing,
        Hang,
    }

    /// Records every command and answers from a table of replies.
    #[derive(Default)]
    pub struct ScriptedRunner {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<CommandSpec>>,
        finished: Arc<Mutex<Vec<CommandSpec>>>,
    }

    impl ScriptedRunner {
        pub fn reply(mut self, suffix: &'static str, reply: Reply) -> Self {
            self.replies.insert(suffix, reply);
            self
        }

        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.lock().unwrap().clone()
        }

        /// Commands answered with [`Reply::Slow`] that ran to completion.
        pub fn finished(&self) -> Vec<CommandSpec> {
            self.finished.lock().unwrap().clone()
        }

        pub fn calls_to(&self, program_suffix: &str) -> Vec<CommandSpec> {
            self.calls()
                .into_iter()
                .filter(|cmd| cmd.program.ends_with(program_suffix))
                .collect()
        }

        fn lookup(&self, command: &CommandSpec) -> Reply {
            let line = command.to_string();
            self.replies
                .iter()
                .find(|(suffix, _)| line.ends_with(*suffix))
                .map_or(Reply::Exit(0, ""), |(_, reply)| reply.clone())
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(
            &self,
            command: &CommandSpec,
            timeout: Duration,
        ) -> impl Future<Output = Result<ProcessOutput, RunError>> + Send {
            self.calls.lock().unwrap().push(command.clone());
            let program = command.program.clone();
            let reply = self.lookup(command);
            let spec = command.clone();
            let finished = Arc::clone(&self.finished);
            async move {
                match reply {
                    Reply::Slow(delay) => {
                        tokio::time::sleep(delay).await;
                        finished.lock().unwrap().push(spec);
                        Ok(ProcessOutput {
                            exit_code: Some(0),
                            stdout: String::new(),
                            stderr: String::new(),
                            duration: delay,
                        })
                    }
                    Reply::Exit(code, stdout) => Ok(ProcessOutput {
                        exit_code: Some(code),
                        stdout: stdout.to_string(),
                        stderr: String::new(),
                        duration: Duration::from_millis(1),
                    }),
                    Reply::Missing => Err(RunError::Spawn {
                        program,
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    }),
                    Reply::Hang => Err(RunError::TimedOut { program, timeout }),
                }
            }
        }
    }
}
