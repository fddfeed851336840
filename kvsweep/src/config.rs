use crate::error::SweepError;
use crate::grid::ParameterGrid;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const LIST_SEP: &str = ",";

// build config
const ANT: &str = "ant";
const BUILD_SERVER_TARGET: &str = "build-server-jar";
const BUILD_PERFORMANCE_TEST_TARGET: &str = "build-performancetest-jar";

// benchmark config
const BENCHMARK_COMMAND: [&str; 3] = ["java", "-jar", "PerformanceTestM2.jar"];
const ECS_CONFIG_FILE: &str = "ecs.config";
const ZK_HOST: &str = "127.0.0.1";
const ZK_PORT: u16 = 2181;
const SERVER_ARTIFACT: &str = "KVServer.jar";
const DATA_DIR: &str = "maildir";

// results file, relative to the working directory
const OUTPUT_FILE: &str = "performance_data.csv";

// the runner binary lives in `<root>/target/<profile>/`, and the working
// directory is two levels up from that directory
const WORKDIR_ANCESTOR: usize = 3;

/// Arguments passed to every benchmark invocation, before the swept ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationSpec {
    pub config_file: PathBuf,
    pub zk_host: String,
    pub zk_port: u16,
    pub server_artifact: PathBuf,
    pub data_dir: PathBuf,
}

impl Default for InvocationSpec {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(ECS_CONFIG_FILE),
            zk_host: String::from(ZK_HOST),
            zk_port: ZK_PORT,
            server_artifact: PathBuf::from(SERVER_ARTIFACT),
            data_dir: PathBuf::from(DATA_DIR),
        }
    }
}

impl InvocationSpec {
    pub fn to_args(&self) -> Vec<String> {
        args![
            self.config_file.display(),
            self.zk_host,
            self.zk_port,
            self.server_artifact.display(),
            self.data_dir.display(),
        ]
    }

    /// Checks that all paths exist, resolving relative ones against
    /// `workdir`.
    pub fn validate_paths(&self, workdir: &Path) -> Result<(), SweepError> {
        let paths = [
            ("configuration file", &self.config_file),
            ("server artifact", &self.server_artifact),
            ("data directory", &self.data_dir),
        ];
        for (name, path) in paths {
            let path = workdir.join(path);
            if !path.exists() {
                return Err(SweepError::MissingPath { name, path });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Directory where build and benchmark commands run and where the output
    /// file is written. If not set, it's derived from the location of the
    /// runner's executable.
    pub workdir: Option<PathBuf>,
    /// Build commands, run in order before the sweep.
    pub build: Vec<Vec<String>>,
    /// Benchmark command line, without the per-invocation arguments.
    pub benchmark: Vec<String>,
    pub invocation: InvocationSpec,
    pub grid: ParameterGrid,
    pub output: PathBuf,
    /// Maximum number of benchmark invocations in flight.
    pub parallel: usize,
    /// Maximum duration of a single build or benchmark invocation.
    pub timeout_secs: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            build: vec![
                args![ANT, BUILD_SERVER_TARGET],
                args![ANT, BUILD_PERFORMANCE_TEST_TARGET],
            ],
            benchmark: BENCHMARK_COMMAND.iter().map(|s| s.to_string()).collect(),
            invocation: InvocationSpec::default(),
            grid: ParameterGrid::default(),
            output: PathBuf::from(OUTPUT_FILE),
            parallel: 1,
            timeout_secs: None,
        }
    }
}

impl SweepConfig {
    /// Loads a config from a JSON file. Fields missing from the file take
    /// their default value.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).wrap_err_with(|| {
            format!("read config file {}", path.display())
        })?;
        Self::from_json(&json)
            .wrap_err_with(|| format!("parse config file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self, Report> {
        let config = serde_json::from_str(json).wrap_err("config json")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if self.benchmark.is_empty() {
            return Err(SweepError::EmptyCommand { name: "benchmark" });
        }
        if self.build.iter().any(|step| step.is_empty()) {
            return Err(SweepError::EmptyCommand { name: "build" });
        }
        if self.parallel == 0 {
            return Err(SweepError::ZeroCount {
                parameter: "parallelism",
            });
        }
        self.grid.validate()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the configured working directory, or the directory two levels
    /// up from the one holding the current executable.
    pub fn resolve_workdir(&self) -> Result<PathBuf, Report> {
        if let Some(workdir) = &self.workdir {
            return Ok(workdir.clone());
        }
        let exe = std::env::current_exe().wrap_err("current executable")?;
        exe.ancestors()
            .nth(WORKDIR_ANCESTOR)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                eyre::eyre!(
                    "executable {} has no ancestor to use as working directory",
                    exe.display()
                )
            })
    }
}

/// Parses a `LIST_SEP`-separated list, e.g. "2,5,8".
pub fn parse_list<T>(list: &str) -> Result<Vec<T>, Report>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    list.split(LIST_SEP)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<T>()
                .wrap_err_with(|| format!("invalid list entry {:?}", entry))
        })
        .collect()
}
