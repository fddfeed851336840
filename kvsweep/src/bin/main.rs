use clap::{App, Arg, ArgMatches};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use kvsweep::config::{self, SweepConfig};
use kvsweep::progress::TracingProgressBar;
use kvsweep::Sweep;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let matches = parse_args();
    let config = load_config(&matches)?;
    let sweep = Sweep::new(config)?;

    if matches.is_present("dry_run") {
        println!("working directory: {}", sweep.workdir().display());
        for line in sweep.plan() {
            println!("{}", line.join(" "));
        }
        println!("output: {}", sweep.output_path().display());
        return Ok(());
    }

    // init logging; from now on, logs are printed above the progress bar
    let progress = TracingProgressBar::init(sweep.config().grid.len());
    let sweep = sweep.with_progress(progress);
    sweep.run().await?;
    Ok(())
}

fn parse_args() -> ArgMatches<'static> {
    App::new("kvsweep")
        .version("0.1")
        .about("Runs the key-value store performance test over a grid of server counts, client counts and write/read ratios, and saves the metrics to a csv file.")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("CONFIG")
                .help("json file with the sweep config; flags below override it")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("workdir")
                .long("workdir")
                .value_name("WORKDIR")
                .env("KVSWEEP_WORKDIR")
                .help("directory where build and benchmark commands run and where results are saved; default: two levels up from the directory of this executable")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("skip_build")
                .long("skip-build")
                .help("do not run the build steps"),
        )
        .arg(
            Arg::with_name("benchmark")
                .long("benchmark")
                .value_name("BENCHMARK")
                .help("benchmark command line (whitespace-separated); default: java -jar PerformanceTestM2.jar")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ecs_config")
                .long("ecs-config")
                .value_name("ECS_CONFIG")
                .env("KVSWEEP_ECS_CONFIG")
                .help("configuration file passed to the benchmark; default: ecs.config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("zk_host")
                .long("zk-host")
                .value_name("ZK_HOST")
                .env("KVSWEEP_ZK_HOST")
                .help("coordination service host; default: 127.0.0.1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("zk_port")
                .long("zk-port")
                .value_name("ZK_PORT")
                .env("KVSWEEP_ZK_PORT")
                .help("coordination service port; default: 2181")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("server_artifact")
                .long("server-artifact")
                .value_name("SERVER_ARTIFACT")
                .env("KVSWEEP_SERVER_ARTIFACT")
                .help("path to the key-value server jar; default: KVServer.jar")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data_dir")
                .long("data-dir")
                .value_name("DATA_DIR")
                .env("KVSWEEP_DATA_DIR")
                .help("directory with the benchmark input data; default: maildir")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("servers")
                .long("servers")
                .value_name("SERVERS")
                .help("comma-separated list of server counts; default: 2,5,8,10")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("clients")
                .long("clients")
                .value_name("CLIENTS")
                .help("comma-separated list of client counts; default: 2,5,8,10")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ratios")
                .long("ratios")
                .value_name("RATIOS")
                .help("comma-separated list of write/read ratios in [0, 1]; default: 0.2,0.5,0.8")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("OUTPUT")
                .help("results file, relative to the working directory; default: performance_data.csv")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("parallel")
                .long("parallel")
                .value_name("PARALLEL")
                .help("maximum number of benchmark invocations in flight; default: 1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("TIMEOUT")
                .help("maximum duration (in seconds) of each build step and benchmark invocation; default: none")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dry_run")
                .long("dry-run")
                .help("print the benchmark invocations and exit"),
        )
        .get_matches()
}

fn load_config(matches: &ArgMatches<'_>) -> Result<SweepConfig, Report> {
    let mut config = match matches.value_of("config") {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::default(),
    };

    if let Some(workdir) = matches.value_of("workdir") {
        config.workdir = Some(PathBuf::from(workdir));
    }
    if matches.is_present("skip_build") {
        config.build.clear();
    }
    if let Some(benchmark) = matches.value_of("benchmark") {
        config.benchmark =
            benchmark.split_whitespace().map(String::from).collect();
    }

    // invocation
    if let Some(path) = matches.value_of("ecs_config") {
        config.invocation.config_file = PathBuf::from(path);
    }
    if let Some(host) = matches.value_of("zk_host") {
        config.invocation.zk_host = host.to_string();
    }
    if let Some(port) = matches.value_of("zk_port") {
        config.invocation.zk_port =
            port.parse().wrap_err("zk port should be a number")?;
    }
    if let Some(path) = matches.value_of("server_artifact") {
        config.invocation.server_artifact = PathBuf::from(path);
    }
    if let Some(path) = matches.value_of("data_dir") {
        config.invocation.data_dir = PathBuf::from(path);
    }

    // grid
    if let Some(servers) = matches.value_of("servers") {
        config.grid.servers = config::parse_list(servers).wrap_err("servers")?;
    }
    if let Some(clients) = matches.value_of("clients") {
        config.grid.clients = config::parse_list(clients).wrap_err("clients")?;
    }
    if let Some(ratios) = matches.value_of("ratios") {
        config.grid.ratios = config::parse_list(ratios).wrap_err("ratios")?;
    }

    if let Some(output) = matches.value_of("output") {
        config.output = PathBuf::from(output);
    }
    if let Some(parallel) = matches.value_of("parallel") {
        config.parallel =
            parallel.parse().wrap_err("parallel should be a number")?;
    }
    if let Some(timeout) = matches.value_of("timeout") {
        config.timeout_secs =
            Some(timeout.parse().wrap_err("timeout should be a number")?);
    }
    Ok(config)
}
