//! Rover bridge application entry point.
//!
//! Resolves configuration (file first, CLI flags on top), binds the
//! operator listener, accepts exactly one connection, and runs the
//! session to completion.  Any setup or session failure surfaces as a
//! non-zero exit with the failing operation in the diagnostic.
//!
//! # Flow
//!
//! ```text
//! main()
//!  └─ resolve_config()          -- file (or default) + CLI overrides
//!  └─ bind_operator_listener()  -- TCP only; udp/bluetooth fail fast
//!  └─ accept_operator()         -- exactly one operator per run
//!  └─ Session::run_*            -- video / control / both
//!       └─ Ctrl-C task          -- cancels the session token
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rover_bridge::application::session::{RunMode, Session};
use rover_bridge::infrastructure::actuator::{ActuatorSink, SerialActuator};
use rover_bridge::infrastructure::camera::{FrameSource, SyntheticCamera};
use rover_bridge::infrastructure::network;
use rover_bridge::infrastructure::storage::config::{self, BridgeConfig};

/// Command-line options.  Every flag overrides the matching config file
/// field; anything not given comes from the file or its defaults.
#[derive(Debug, Parser)]
#[command(
    name = "rover-bridge",
    about = "Streams rover camera frames to an operator and relays operator control back to the drive actuator",
    version
)]
struct Cli {
    /// Read configuration from this file instead of the platform path.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Transport to accept the operator on (tcp, udp, bluetooth).
    #[arg(long)]
    transport: Option<String>,

    /// Units to run for the session (video, control, both).
    #[arg(long)]
    mode: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Serial device the drive actuator is attached to.
    #[arg(long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Write the default configuration to the platform path and exit.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if cli.write_default_config {
        let path = config::save_config(&BridgeConfig::default())
            .context("writing default configuration")?;
        info!(path = %path.display(), "default configuration written");
        return Ok(());
    }

    let cfg = resolve_config(&cli)?;
    info!(
        transport = %cfg.network.transport,
        mode = %cfg.session.mode,
        port = cfg.network.port,
        "rover bridge starting"
    );

    // ── Operator connection ────────────────────────────────────────────────
    let listener = network::bind_operator_listener(
        cfg.network.transport,
        &cfg.network.bind_address,
        cfg.network.port,
    )
    .await
    .context("setting up the operator listener")?;
    let (stream, _peer) = network::accept_operator(&listener)
        .await
        .context("accepting the operator connection")?;

    let session = Session::new(stream);

    // ── Shutdown handling ──────────────────────────────────────────────────
    // Ctrl-C ends the session cooperatively; both units observe the token
    // at their next loop boundary.
    let cancel = session.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            cancel.cancel();
        }
    });

    // ── Session ────────────────────────────────────────────────────────────
    let result = match cfg.session.mode {
        RunMode::Video => session.run_video(make_camera(&cfg)).await,
        RunMode::Control => session.run_control(make_sink(&cfg)?).await,
        RunMode::Both => session.run_both(make_camera(&cfg), make_sink(&cfg)?).await,
    };

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            error!(error = %e, "session failed");
            return Err(e.into());
        }
    };

    info!(
        frames = stats.frames_sent,
        records = stats.records_relayed,
        "rover bridge stopped"
    );
    Ok(())
}

/// Loads the configuration file and applies CLI overrides on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<BridgeConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => config::load_config().context("loading configuration")?,
    };

    if let Some(transport) = &cli.transport {
        cfg.network.transport = transport.parse().context("parsing --transport")?;
    }
    if let Some(mode) = &cli.mode {
        cfg.session.mode = mode.parse().context("parsing --mode")?;
    }
    if let Some(port) = cli.port {
        cfg.network.port = port;
    }
    if let Some(device) = &cli.device {
        cfg.actuator.device = device.clone();
    }

    Ok(cfg)
}

/// Builds the frame source for modes that stream video.
fn make_camera(cfg: &BridgeConfig) -> Box<dyn FrameSource> {
    Box::new(SyntheticCamera::new(
        cfg.camera.width,
        cfg.camera.height,
        cfg.camera.jpeg_quality,
    ))
}

/// Opens the actuator device for modes that relay control.  Modes that
/// never relay must not touch the device at all, so this is only called
/// for `control` and `both`.
fn make_sink(cfg: &BridgeConfig) -> anyhow::Result<Box<dyn ActuatorSink>> {
    let sink = SerialActuator::open(&cfg.actuator.device, cfg.actuator.baud_rate)
        .context("opening the actuator device")?;
    Ok(Box::new(sink))
}
