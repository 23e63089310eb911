mod cli;
mod driver;

use anyhow::Context;
use autorotate_accel::IioAccelerometer;
use autorotate_config::AppConfig;
use autorotate_display::XrandrActuator;
use clap::Parser;
use cli::Cli;
use driver::Driver;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Fatal problems found before the polling loop starts.
#[derive(Debug, Error)]
enum StartupError {
    #[error("Unable to find any accelerometer")]
    NoAccelerometer,
    #[error("Device discovery failed: {0:#}")]
    Discovery(anyhow::Error),
    #[error("Unable to detect touch device")]
    NoTouchDevice,
    #[error("Invalid configuration: {0:#}")]
    Config(anyhow::Error),
}

/// Exit status for arguments clap could not parse.
const USAGE_EXIT_CODE: u8 = 3;

/// Parse the command line. Help and version output exit 0 through clap; any
/// other parse failure is printed and mapped to [`USAGE_EXIT_CODE`].
fn parse_cli<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            Err(USAGE_EXIT_CODE)
        }
    }
}

impl StartupError {
    fn exit_code(&self) -> u8 {
        match self {
            StartupError::NoAccelerometer => 1,
            StartupError::Discovery(_) => 2,
            StartupError::NoTouchDevice => 4,
            StartupError::Config(_) => 5,
        }
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet {
        "warn"
    } else {
        "autorotate=info,autorotate_accel=info,autorotate_display=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

/// Load the config file and overlay the command line.
fn load_config(cli: &Cli) -> Result<AppConfig, StartupError> {
    let mut config = match &cli.config {
        // An explicitly requested file has to be usable.
        Some(path) => autorotate_config::load_config_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))
            .map_err(StartupError::Config)?,
        None => autorotate_config::load_config().unwrap_or_else(|e| {
            warn!(?e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };

    cli.apply(&mut config);
    config.validate().map_err(StartupError::Config)?;

    if cli.save_config {
        let saved = match &cli.config {
            Some(path) => autorotate_config::save_config_to(&config, path),
            None => autorotate_config::save_config(&config),
        };
        if let Err(e) = saved {
            warn!(?e, "Failed to save config");
        }
    }

    Ok(config)
}

fn resolve_accelerometer(config: &AppConfig) -> Result<PathBuf, StartupError> {
    if let Some(dir) = &config.sensor.accelerometer_dir {
        return Ok(dir.clone());
    }
    autorotate_accel::detect_accelerometer_dir()
        .map_err(|e| StartupError::Discovery(e.into()))?
        .ok_or(StartupError::NoAccelerometer)
}

fn resolve_touch_device(config: &AppConfig) -> Result<String, StartupError> {
    if let Some(dev) = &config.display.touch_device {
        return Ok(dev.clone());
    }
    match autorotate_display::detect_touch_device() {
        Ok(Some(dev)) => Ok(dev),
        Ok(None) => Err(StartupError::NoTouchDevice),
        Err(e) => {
            warn!(error = %e, "Touch device listing failed");
            Err(StartupError::NoTouchDevice)
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = load_config(&cli)?;
    let accel_dir = resolve_accelerometer(&config)?;
    let touch_device = resolve_touch_device(&config)?;

    info!(
        accelerometer = %accel_dir.display(),
        touch_device = %touch_device,
        orientation_cmd = config.display.orientation_cmd.as_deref().unwrap_or(""),
        allow_inverted = config.engine.allow_inverted,
        debounce_ticks = config.engine.debounce_ticks,
        tick_interval_ms = config.engine.tick_interval_ms,
        "Configuration"
    );

    let accelerometer = IioAccelerometer::open(&accel_dir)
        .map_err(|e| StartupError::Config(e.into()))?;
    let actuator = XrandrActuator::new(touch_device);

    let mut driver = Driver::new(
        accelerometer,
        actuator,
        config.engine.allow_inverted,
        config.engine.debounce_ticks,
        config.display.orientation_cmd.clone(),
    );

    let mut interval = tokio::time::interval(config.engine.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                driver.tick();
            }
            _ = &mut shutdown => {
                info!(orientation = %driver.committed(), "Stopping");
                return Ok(());
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };
    init_logging(cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
