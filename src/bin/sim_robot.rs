use std::{net::SocketAddr, path::PathBuf, process, time::Duration};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use vel_scheduler::{config::Config, testing::sim_robot::run_sim_robot};

/// Kinematic simulated base: follows the received twists and publishes odometry.
#[derive(Parser, Debug)]
struct Args {
    /// same file as the scheduler, to agree on the addresses
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// odometry publishing period in ms
    #[arg(long, default_value = "20")]
    period_ms: u64,

    /// uniform noise added to every odometry field
    #[arg(long, default_value = "0.0")]
    noise: f64,

    /// overrides the address twists are received on
    #[arg(long)]
    command_addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("couldn't load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = run_sim_robot(
        args.command_addr.unwrap_or(config.net.command_addr),
        config.net.inbound_addr,
        Duration::from_millis(args.period_ms),
        args.noise,
    )
    .await
    {
        error!("simulated robot stopped: {}", e);
    }
}
