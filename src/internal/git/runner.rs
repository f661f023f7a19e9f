use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tokio::runtime::Runtime;
use tokio::time::timeout;

use crate::internal::errors::BrowseError;

pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs history queries against a repository and returns their stdout, line by line.
pub trait GitQueryRunner {
    fn run(&self, root: &Path, command: &str, args: &[String]) -> Result<Vec<String>, BrowseError>;
}

#[derive(Debug, Clone)]
pub struct CliGitRunner {
    program: String,
    timeout: Duration,
}

impl CliGitRunner {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("git", timeout)
    }

    pub fn with_program(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for CliGitRunner {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_TIMEOUT)
    }
}

impl GitQueryRunner for CliGitRunner {
    fn run(&self, root: &Path, command: &str, args: &[String]) -> Result<Vec<String>, BrowseError> {
        let description = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        log::debug!("running {} {} in {}", self.program, description, root.display());

        let rt = Runtime::new()?;
        rt.block_on(async {
            let mut process = TokioCommand::new(&self.program);
            process
                .arg(command)
                .args(args)
                .current_dir(root)
                .env("GIT_TERMINAL_PROMPT", "0")
                .stdin(Stdio::null())
                .kill_on_drop(true);

            let output = match timeout(self.timeout, process.output()).await {
                Ok(Ok(output)) => output,
                Ok(Err(err)) => {
                    return Err(BrowseError::ExternalToolError {
                        command: description,
                        message: err.to_string(),
                    })
                }
                Err(_) => {
                    return Err(BrowseError::ExternalToolTimeout {
                        command: description,
                        timeout: self.timeout,
                    })
                }
            };

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let message = if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                };
                return Err(BrowseError::ExternalToolError {
                    command: description,
                    message,
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::to_string)
                .collect())
        })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
