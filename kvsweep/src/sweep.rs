use crate::bench;
use crate::config::SweepConfig;
use crate::progress::TracingProgressBar;
use crate::setup;
use crate::table::ResultTable;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// Drives a sweep: build phase, path validation, one benchmark invocation
/// per grid point and, if every point succeeded, a single write of the
/// results file.
pub struct Sweep {
    config: SweepConfig,
    workdir: PathBuf,
    progress: TracingProgressBar,
}

impl Sweep {
    pub fn new(config: SweepConfig) -> Result<Self, Report> {
        config.validate()?;
        let workdir = config.resolve_workdir()?;
        Ok(Self {
            config,
            workdir,
            progress: TracingProgressBar::hidden(),
        })
    }

    /// Reports sweep progress on `progress`.
    pub fn with_progress(mut self, progress: TracingProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn output_path(&self) -> PathBuf {
        self.workdir.join(&self.config.output)
    }

    /// Full command line of every benchmark invocation, in sweep order.
    pub fn plan(&self) -> Vec<Vec<String>> {
        self.config
            .grid
            .points()
            .map(|point| {
                let mut line = self.config.benchmark.clone();
                line.extend(bench::bench_args(&self.config, &point));
                line
            })
            .collect()
    }

    /// Runs all phases and returns the table that was saved.
    pub async fn run(&self) -> Result<ResultTable, Report> {
        tracing::info!("working directory: {}", self.workdir.display());

        setup::build(&self.config.build, &self.workdir, self.config.timeout())
            .await?;

        self.config.invocation.validate_paths(&self.workdir)?;

        let table = self.sweep().await?;

        let output = self.output_path();
        table
            .save(&output)
            .wrap_err_with(|| format!("save results to {}", output.display()))?;
        tracing::info!("{} rows saved to {}", table.len(), output.display());
        Ok(table)
    }

    /// Runs the benchmark for every grid point, with at most
    /// `config.parallel` invocations in flight. Rows are collected in sweep
    /// order regardless of completion order. The first failure aborts the
    /// sweep, killing invocations still in flight.
    async fn sweep(&self) -> Result<ResultTable, Report> {
        let grid = &self.config.grid;
        tracing::info!(
            "sweeping {} points ({} servers x {} clients x {} ratios)",
            grid.len(),
            grid.servers.len(),
            grid.clients.len(),
            grid.ratios.len()
        );

        let mut table = ResultTable::with_capacity(grid.len());
        let mut rows = stream::iter(grid.points())
            .map(|point| bench::run_point(&self.config, &self.workdir, point))
            .buffered(self.config.parallel);
        while let Some(row) = rows.next().await {
            let row = row?;
            tracing::info!("{}", row);
            self.progress.inc();
            table.push(row);
        }
        self.progress.finish();
        Ok(table)
    }
}
