//! Headless driver for the multi-species life simulation.
//!
//! Usage: `life-runner [config.json]`. Each line on stdin is parsed as a
//! command (`r`, `c`, `p`, `1`-`7`, `place <x> <y>`, `step`, `quit`).

mod telemetry;

use anyhow::{Context, Result};
use life_core::RunnerConfig;
use life_world::{Command, Simulation};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(async_main());

    // A pending stdin read holds a blocking thread that cannot be cancelled
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn async_main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => RunnerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => RunnerConfig::default(),
    };
    config.validate()?;

    info!(
        width = config.world.width,
        height = config.world.height,
        ticks_per_second = config.ticks_per_second,
        max_ticks = ?config.max_ticks,
        "Starting life runner"
    );

    let mut sim = Simulation::new(config.world.clone())?;
    sim.set_paused(config.start_paused);

    run(&mut sim, &config).await;

    sim.emit_population_metrics();
    info!(generation = sim.generation(), "Runner stopped");

    Ok(())
}

async fn run(sim: &mut Simulation, config: &RunnerConfig) {
    let mut ticker = interval(Duration::from_secs_f64(1.0 / f64::from(config.ticks_per_second)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut ticks_run: u64 = 0;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !sim.tick() {
                    continue;
                }
                ticks_run += 1;

                if config.metrics_interval > 0 && sim.generation() % config.metrics_interval == 0 {
                    sim.emit_population_metrics();
                }

                if config.max_ticks.is_some_and(|max| ticks_run >= max) {
                    info!(ticks_run, "Tick limit reached");
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                            break;
                        }
                        if let Err(e) = line.parse::<Command>().and_then(|command| sim.apply(command)) {
                            warn!("Ignoring input {:?}: {}", line, e);
                        }
                    }
                    Ok(None) => {
                        info!("Stdin closed, running without commands");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = &mut shutdown => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
