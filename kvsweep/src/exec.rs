use crate::error::SweepError;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Result of running an external command to completion. Callers are
/// expected to check `success` before trusting `stdout`.
#[derive(Debug)]
pub struct Execution {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Execution {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim_end().to_string()
    }
}

impl From<Output> for Execution {
    fn from(output: Output) -> Self {
        Self {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Creates a command from `command_line` (program followed by its leading
/// arguments) with `args` appended, to be run in `workdir`.
pub fn prepare(
    command_line: &[String],
    args: Vec<String>,
    workdir: &Path,
) -> Result<Command, Report> {
    let (program, leading) = command_line
        .split_first()
        .ok_or_else(|| eyre::eyre!("empty command line"))?;
    tracing::debug!(
        "{} {} {} (in {})",
        program,
        leading.join(" "),
        args.join(" "),
        workdir.display()
    );

    let mut command = Command::new(program);
    command
        .args(leading)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        // if the future driving the command is dropped (e.g. on timeout or
        // when another point fails), the child should not outlive it
        .kill_on_drop(true);
    Ok(command)
}

/// Runs `command` to completion, capturing both stdout and stderr. `target`
/// describes the command in errors.
pub async fn run(
    mut command: Command,
    timeout: Option<Duration>,
    target: impl fmt::Display,
) -> Result<Execution, Report> {
    let output = match timeout {
        Some(after) => {
            match tokio::time::timeout(after, command.output()).await {
                Ok(output) => output,
                Err(_) => {
                    return Err(SweepError::Timeout {
                        target: target.to_string(),
                        after,
                    }
                    .into())
                }
            }
        }
        None => command.output().await,
    };
    let output = output.wrap_err_with(|| format!("spawn {}", target))?;
    Ok(Execution::from(output))
}
