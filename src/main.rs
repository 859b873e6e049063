//! `pulsenet` command-line front end.
//!
//! Reads a wiring file and answers one of two queries: pulse totals over
//! a fixed number of presses, or the first press delivering a low pulse
//! to the network's sink.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pulsenet::config::{DEFAULT_MAX_PRESSES, DEFAULT_PRESSES};
use pulsenet::{logging, ModuleGraph, PeriodicityAnalyzer, RunConfig, Simulation};

#[derive(Parser)]
#[command(
    name = "pulsenet",
    version,
    about = "Simulate a pulse-propagation module network"
)]
struct Cli {
    /// Wiring file, one `<sigil><name> -> <dest>, ...` definition per line.
    wiring: PathBuf,

    /// Button presses for the counting query.
    #[arg(long, default_value_t = DEFAULT_PRESSES)]
    presses: u64,

    /// Give up after this many presses when searching for the sink's low pulse.
    #[arg(long, default_value_t = DEFAULT_MAX_PRESSES)]
    max_presses: u64,

    /// Predict the first press that delivers a low pulse to the sink.
    #[arg(long)]
    predict: bool,

    /// With --predict, simulate press by press instead of using periodicity.
    #[arg(long, requires = "predict")]
    brute_force: bool,

    /// Print every message delivered during the first press.
    #[arg(long)]
    trace: bool,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.wiring)
        .with_context(|| format!("read {}", cli.wiring.display()))?;
    let graph = ModuleGraph::from_text(&text)
        .with_context(|| format!("build network from {}", cli.wiring.display()))?;

    let config = RunConfig::new()
        .presses(cli.presses)
        .max_presses(cli.max_presses);

    if cli.trace {
        print_first_press(graph.clone())?;
    }

    if cli.predict {
        cmd_predict(graph, &config, cli.brute_force)
    } else {
        cmd_count(graph, &config)
    }
}

fn cmd_count(graph: ModuleGraph, config: &RunConfig) -> Result<()> {
    let mut sim = Simulation::with_config(graph, config);
    let total = sim
        .totals_over(config.presses)
        .with_context(|| format!("simulate {} presses", config.presses))?;
    let product = total
        .product()
        .with_context(|| format!("{} low x {} high pulses overflows u64", total.low, total.high))?;
    println!("low={} high={} product={}", total.low, total.high, product);
    Ok(())
}

fn cmd_predict(graph: ModuleGraph, config: &RunConfig, brute_force: bool) -> Result<()> {
    let analyzer = PeriodicityAnalyzer::from_config(config);
    let mut sim = Simulation::with_config(graph, config);

    if brute_force {
        let press = analyzer
            .first_low_at_sink_by_simulation(&mut sim)
            .context("search for the sink's first low pulse")?;
        println!("first low at sink: press {}", press.raw());
        return Ok(());
    }

    let report = analyzer
        .analyze(&mut sim)
        .context("analyze periodicity of the sink's feeder")?;
    for (input, press) in &report.stamps {
        let name = sim.module(*input).map_or("?", |m| m.name());
        println!("  {} first high at press {}", name, press.raw());
    }
    println!("first low at sink: press {}", report.predicted);
    Ok(())
}

fn print_first_press(graph: ModuleGraph) -> Result<()> {
    let mut sim = Simulation::with_config(graph, &RunConfig::new().with_trace());
    let counts = sim.press_button().context("simulate first press")?;
    for entry in sim.trace() {
        println!("{}", sim.describe(entry));
    }
    println!("({})", counts);
    Ok(())
}
