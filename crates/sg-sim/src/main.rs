//! Segalla slot simulator
//!
//! Runs an auto-play session headlessly in virtual time and prints the
//! session statistics as JSON.
//!
//! Usage:
//!   sg-sim --spins 10000 --seed 42
//!   sg-sim --config machine.yaml --turbo --trace trace.json
//!   RUST_LOG=debug sg-sim --spins 3

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use sg_slot_engine::{Credits, MachineConfig, SessionStats, SlotMachine, TraceObserver};
use sg_stage::BigWinTier;

#[derive(Parser)]
#[command(name = "sg-sim", about = "Headless auto-play session for the Segalla 3x3 slot")]
struct Cli {
    /// Spins to resolve (auto-play stops earlier when funds run out)
    #[arg(short, long, default_value_t = 1000)]
    spins: u64,

    /// Wager per spin (overrides config)
    #[arg(short, long)]
    wager: Option<f64>,

    /// Opening balance (overrides config)
    #[arg(short, long)]
    balance: Option<f64>,

    /// Entropy seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Use turbo timing
    #[arg(short, long)]
    turbo: bool,

    /// Machine config (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the stage trace as JSON
    #[arg(long)]
    trace: Option<PathBuf>,
}

/// Printed session summary
#[derive(Serialize)]
struct Report {
    spins_requested: u64,
    spins_resolved: u64,
    seed: Option<u64>,
    starting_balance: Credits,
    final_balance: Credits,
    virtual_time_ms: u64,
    rtp_percent: f64,
    hit_rate_percent: f64,
    max_big_win: Option<BigWinTier>,
    stats: SessionStats,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.spins == 0 {
        bail!("--spins must be at least 1");
    }

    let config = load_config(&cli)?;
    let seed = config.seed;
    let starting_balance = config.starting_balance_credits();
    log::info!(
        "Simulating {} spins (seed {:?}, turbo {})",
        cli.spins,
        seed,
        cli.turbo
    );

    let observer = TraceObserver::new(format!("sim-{}", seed.unwrap_or_default()));
    let mut machine =
        SlotMachine::with_observer(config, observer).context("Failed to build slot machine")?;
    machine.set_turbo(cli.turbo);
    machine.set_auto_play(true);

    while machine.stats().total_spins < cli.spins && machine.step() {}
    machine.set_auto_play(false);
    machine.finish_spin();

    if machine.stats().total_spins < cli.spins {
        log::warn!(
            "Auto-play stopped after {} spins: balance {} below wager {}",
            machine.stats().total_spins,
            machine.balance(),
            machine.wager()
        );
    }

    let report = Report {
        spins_requested: cli.spins,
        spins_resolved: machine.stats().total_spins,
        seed,
        starting_balance,
        final_balance: machine.balance(),
        virtual_time_ms: machine.now_ms(),
        rtp_percent: machine.stats().rtp(),
        hit_rate_percent: machine.stats().hit_rate(),
        max_big_win: machine.observer().trace().max_big_win_tier(),
        stats: machine.stats().clone(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = &cli.trace {
        let trace = machine.into_observer().into_trace();
        let validation = trace.validate();
        for warning in validation.warnings() {
            log::warn!("Trace: {}", warning);
        }
        let json = trace.to_json_pretty().context("Failed to serialize trace")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        log::info!("Trace written to {}", path.display());
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<MachineConfig> {
    let mut config = match &cli.config {
        Some(path) => MachineConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MachineConfig::default(),
    };

    if let Some(balance) = cli.balance {
        config.starting_balance = balance;
    }
    if let Some(wager) = cli.wager {
        config.starting_wager = wager;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate().context("Invalid machine config")?;
    Ok(config)
}
