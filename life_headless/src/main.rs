// main.rs - Headless Game of Life, paced by a tokio interval
//
// Each tick presents the current generation on stdout and advances once.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use life_engine::{Engine, LifeResult, Params, Presenter, Scheduler, Step, patterns};
use tracing::{info, warn};

/// Run Conway's Game of Life in the terminal.
#[derive(Parser, Debug)]
#[command(name = "life_headless", version)]
#[command(about = "Run Conway's Game of Life on a torus and print each generation")]
struct Args {
    /// Query string or URL with `rows`, `columns` and `seed`, e.g. "?rows=20&columns=40&seed=7".
    #[arg(default_value = "")]
    params: String,

    /// Delay between generations, in milliseconds.
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pacing_ms: u64,

    /// Start from a named pattern (e.g. glider, pulsar) centred on a dead grid.
    #[arg(long, value_name = "NAME")]
    pattern: Option<String>,

    /// Stop after this many generations.
    #[arg(long)]
    generations: Option<u64>,

    /// Stop when a generation repeats one of the last ten.
    #[arg(long)]
    stop_on_cycle: bool,

    /// Print frames one after another instead of redrawing in place.
    #[arg(long)]
    plain: bool,

    /// Enable debug logging (includes snapshots of the first generations).
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Writes one frame per call to the wrapped writer.
struct TerminalPresenter<W: Write> {
    out: W,
    plain: bool,
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, engine: &Engine) -> LifeResult<()> {
        if !self.plain {
            // Clear screen, cursor home.
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        writeln!(
            self.out,
            "Generation: {}  Live cells: {}/{}",
            engine.generation(),
            engine.live_count(),
            engine.row_count() * engine.column_count()
        )?;
        write!(self.out, "{engine}")?;
        if self.plain {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let params = Params::parse(&args.params);
    info!(rows = params.rows, columns = params.columns, seed = params.seed, "parameters");
    let engine = build_engine(&params, args.pattern.as_deref())?;

    let mut scheduler = Scheduler::new(engine).with_pacing(Duration::from_millis(args.pacing_ms));
    if args.stop_on_cycle {
        scheduler = scheduler.with_cycle_detection(life_engine::cycle::DEFAULT_WINDOW);
    }

    let mut presenter = TerminalPresenter {
        out: io::stdout().lock(),
        plain: args.plain,
    };

    // Single-threaded: the scheduler is only ever touched from this task.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start the runtime")?;
    runtime.block_on(run(scheduler, &mut presenter, args.generations))
}

/// Random fill from `params`, or `pattern` centred on a dead grid of the same size.
fn build_engine(params: &Params, pattern: Option<&str>) -> Result<Engine> {
    let Some(name) = pattern else {
        return Engine::from_params(params).context("cannot build the automaton");
    };
    let pattern = patterns::find(name).ok_or_else(|| {
        let known: Vec<&str> = patterns::PATTERNS.iter().map(|p| p.name).collect();
        anyhow!("unknown pattern {name:?} (known: {})", known.join(", "))
    })?;

    let (height, width) = pattern.extent();
    let offset = (
        usize::try_from(params.rows).unwrap_or(0).saturating_sub(height) / 2,
        usize::try_from(params.columns).unwrap_or(0).saturating_sub(width) / 2,
    );
    Engine::from_pattern(params.rows, params.columns, pattern, offset)
        .with_context(|| format!("cannot place {} on the grid", pattern.name))
}

async fn run<W: Write>(
    mut scheduler: Scheduler,
    presenter: &mut TerminalPresenter<W>,
    limit: Option<u64>,
) -> Result<()> {
    if limit == Some(0) {
        presenter.present(scheduler.engine())?;
        return Ok(());
    }

    // `interval` panics on a zero period.
    let period = scheduler.pacing().max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!(generation = scheduler.engine().generation(), "interrupted");
                break;
            }
            _ = ticker.tick() => {
                match scheduler.frame(presenter)? {
                    Step::Advanced { generation } => {
                        if limit.is_some_and(|limit| generation >= limit) {
                            // Show the final generation before leaving.
                            presenter.present(scheduler.engine())?;
                            info!(generation, "generation limit reached");
                            break;
                        }
                    }
                    Step::CycleDetected { generation } => {
                        presenter.present(scheduler.engine())?;
                        info!(generation, "stopping on repeated generation");
                        break;
                    }
                    Step::Paused | Step::Waiting { .. } => {
                        warn!("scheduler stopped advancing");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
