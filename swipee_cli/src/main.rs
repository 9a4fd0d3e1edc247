use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swipee_core::{
    DeviceResolver, DistanceMetric, FixedDevice, GestureReport, GestureRequest, Injector,
    Interpolation, Invocation, SwipeConfig, Swiper, WaitPolicy, parse_args, usage,
};
use swipee_input::{EvdevResolver, TraceRecorder, device_id_from_node};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
// Exit status for a command line that could not be turned into a gesture.
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "swipee")]
#[command(
    about = "Inject a synthetic swipe into the device's input pipeline",
    long_about = None
)]
#[command(override_usage = "swipee [OPTIONS] [<source>] <command> <x1> <y1> <x2> <y2> <step>")]
struct Cli {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Easing between the endpoints (linear, sine)
    #[arg(long, value_name = "KIND")]
    interpolation: Option<Interpolation>,

    /// How the path length is measured (observed, euclidean)
    #[arg(long, value_name = "KIND")]
    metric: Option<DistanceMetric>,

    /// Injection wait policy (async, wait_for_result, wait_for_finish)
    #[arg(long, value_name = "POLICY")]
    wait: Option<WaitPolicy>,

    /// Pause between consecutive samples
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Event node to write to instead of looking one up
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Log the samples without injecting them
    #[arg(long)]
    dry_run: bool,

    /// Record the samples to FILE instead of injecting them
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// More log output (-v samples, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_negative_numbers = true
    )]
    args: Vec<String>,
}

impl Cli {
    fn config(&self) -> anyhow::Result<SwipeConfig> {
        let mut config = match &self.config {
            Some(path) => SwipeConfig::load(path)?,
            None => SwipeConfig::default(),
        };
        if let Some(interpolation) = self.interpolation {
            config.interpolation = interpolation;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(wait) = self.wait {
            config.wait = wait;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.sample_interval_ms = interval_ms;
        }
        if let Some(device) = &self.device {
            config.device = Some(device.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(execute(&cli, &mut io::stderr()))
}

/// Runs one invocation, reporting problems on `stderr`; returns the exit status.
fn execute(cli: &Cli, stderr: &mut impl Write) -> u8 {
    let request = match parse_args(&cli.args) {
        Ok(Invocation::Usage) => {
            let _ = write!(stderr, "{}", usage());
            return EXIT_SUCCESS;
        }
        Ok(Invocation::Swipe(request)) => request,
        Err(e) => {
            let _ = writeln!(stderr, "{e}");
            let _ = write!(stderr, "{}", usage());
            return EXIT_USAGE;
        }
    };

    match run(cli, &request) {
        Ok(report) => {
            info!(device = %report.device, samples = report.samples, "swipe injected");
            EXIT_SUCCESS
        }
        Err(e) => {
            let _ = writeln!(stderr, "Error: {e:#}");
            EXIT_FAILURE
        }
    }
}

fn run(cli: &Cli, request: &GestureRequest) -> anyhow::Result<GestureReport> {
    let config = cli.config()?;
    let options = config.options();

    // An explicit node bypasses the lookup entirely.
    let resolver: Box<dyn DeviceResolver> = match &config.device {
        Some(node) => Box::new(FixedDevice(device_id_from_node(node).unwrap_or_default())),
        None => Box::new(EvdevResolver::new(&config.dev_input_dir)),
    };

    let injector: Box<dyn Injector> = if let Some(path) = &cli.trace {
        Box::new(
            TraceRecorder::create(path)
                .with_context(|| format!("cannot create trace file {}", path.display()))?,
        )
    } else if cli.dry_run {
        Box::new(TraceRecorder::discard())
    } else {
        direct_injector(&config)?
    };

    let report = Swiper::new(resolver, injector, options).swipe(request)?;
    Ok(report)
}

#[cfg(feature = "direct_input")]
fn direct_injector(config: &SwipeConfig) -> anyhow::Result<Box<dyn Injector>> {
    use swipee_input::EvdevInjector;

    Ok(match &config.device {
        Some(node) => Box::new(EvdevInjector::with_node(node)),
        None => Box::new(EvdevInjector::new(&config.dev_input_dir)),
    })
}

#[cfg(not(feature = "direct_input"))]
fn direct_injector(_config: &SwipeConfig) -> anyhow::Result<Box<dyn Injector>> {
    anyhow::bail!("built without the direct_input feature; use --dry-run or --trace")
}
