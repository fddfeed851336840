use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::exec;
use crate::grid::SweepPoint;
use crate::output::BenchOutput;
use crate::table::ResultRow;
use color_eyre::Report;
use std::path::Path;

/// Full list of arguments appended to the benchmark command for `point`: the
/// fixed invocation arguments followed by the swept ones.
pub fn bench_args(config: &SweepConfig, point: &SweepPoint) -> Vec<String> {
    let mut args = config.invocation.to_args();
    args.extend(point.to_args());
    args
}

/// Runs the benchmark once for `point` and parses its output into a row.
pub async fn run_point(
    config: &SweepConfig,
    workdir: &Path,
    point: SweepPoint,
) -> Result<ResultRow, Report> {
    let command =
        exec::prepare(&config.benchmark, bench_args(config, &point), workdir)?;
    let execution = exec::run(command, config.timeout(), point).await?;

    if !execution.success() {
        return Err(SweepError::BenchmarkFailed {
            point,
            status: execution.status,
            stderr: execution.stderr_lossy(),
        }
        .into());
    }
    if !execution.stderr.is_empty() {
        tracing::debug!("{} stderr:\n{}", point, execution.stderr_lossy());
    }

    let output = BenchOutput::parse(&execution.stdout)
        .map_err(|source| SweepError::MalformedOutput { point, source })?;
    Ok(ResultRow::new(point, output))
}
