use crate::error::SweepError;
use crate::exec;
use color_eyre::Report;
use std::path::Path;
use std::time::Duration;

/// Runs the build steps in order, stopping at the first one that fails.
pub async fn build(
    steps: &[Vec<String>],
    workdir: &Path,
    timeout: Option<Duration>,
) -> Result<(), Report> {
    for step in steps {
        let step_line = step.join(" ");
        tracing::info!("building: {}", step_line);

        let command = exec::prepare(step, Vec::new(), workdir)?;
        let execution =
            exec::run(command, timeout, format!("build step `{}`", step_line))
                .await?;
        if !execution.success() {
            return Err(SweepError::BuildFailed {
                step: step_line,
                status: execution.status,
                stderr: execution.stderr_lossy(),
            }
            .into());
        }
        tracing::debug!(
            "build step `{}` output:\n{}",
            step_line,
            String::from_utf8_lossy(&execution.stdout)
        );
    }
    Ok(())
}
