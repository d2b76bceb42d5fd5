// main.rs - Desktop window for Conway's Game of Life on a torus

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use life_engine::{Engine, Params, Scheduler, cycle};
use tracing::info;

mod app;
mod layout;

use app::LifeApp;

/// Draw Conway's Game of Life in a window.
#[derive(Parser, Debug)]
#[command(name = "life_canvas", version)]
#[command(about = "Show Conway's Game of Life on a torus as a grid of squares")]
struct Args {
    /// Query string or URL with `rows`, `columns` and `seed`, e.g. "?rows=20&columns=40&seed=7".
    #[arg(default_value = "")]
    params: String,

    /// Delay between generations, in milliseconds.
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pacing_ms: u64,

    /// Pause when a generation repeats one of the last ten.
    #[arg(long)]
    stop_on_cycle: bool,

    /// Enable debug logging (includes snapshots of the first generations).
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let params = Params::parse(&args.params);
    info!(rows = params.rows, columns = params.columns, seed = params.seed, "parameters");
    let engine = Engine::from_params(&params).context("cannot build the automaton")?;

    let mut scheduler = Scheduler::new(engine).with_pacing(Duration::from_millis(args.pacing_ms));
    if args.stop_on_cycle {
        scheduler = scheduler.with_cycle_detection(cycle::DEFAULT_WINDOW);
    }
    let app = LifeApp::new(scheduler, params);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}
