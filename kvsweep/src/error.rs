use crate::grid::SweepPoint;
use crate::output::OutputError;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failures of a sweep that callers may want to tell apart. They are raised
/// as `color_eyre::Report`s and can be recovered with `downcast_ref`.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("ratio {ratio} should be a finite number within [0, 1]")]
    InvalidRatio { ratio: f64 },

    #[error("{parameter} should be at least 1")]
    ZeroCount { parameter: &'static str },

    #[error("{name} command line is empty")]
    EmptyCommand { name: &'static str },

    #[error("{name} not found at {}", .path.display())]
    MissingPath { name: &'static str, path: PathBuf },

    #[error("build step `{step}` failed with {status}; stderr:\n{stderr}")]
    BuildFailed {
        step: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("benchmark at {point} failed with {status}; stderr:\n{stderr}")]
    BenchmarkFailed {
        point: SweepPoint,
        status: ExitStatus,
        stderr: String,
    },

    #[error("benchmark at {point} produced malformed output")]
    MalformedOutput {
        point: SweepPoint,
        #[source]
        source: OutputError,
    },

    #[error("{target} did not finish within {after:?}")]
    Timeout { target: String, after: Duration },
}
