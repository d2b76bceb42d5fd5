// scheduler.rs - Present-then-advance frame loop around a single engine

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cycle::CycleDetector;
use crate::engine::Engine;
use crate::error::LifeResult;

/// Default delay between two generations.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Snapshots of generations below this are logged at debug level.
const SNAPSHOT_GENERATIONS: u64 = 4;

/// Something that draws an engine. It only ever gets a shared reference.
pub trait Presenter {
    fn present(&mut self, engine: &Engine) -> LifeResult<()>;
}

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The engine moved to `generation`.
    Advanced { generation: u64 },
    /// Pacing has not elapsed yet.
    Waiting { remaining: Duration },
    /// The scheduler is paused; nothing was advanced.
    Paused,
    /// The engine advanced to `generation`, which repeats a recent one.
    /// The scheduler paused itself.
    CycleDetected { generation: u64 },
}

/// Owns one engine and decides when it advances.
pub struct Scheduler {
    engine: Engine,
    pacing: Duration,
    running: bool,
    last_advance: Option<Instant>,
    cycles: Option<CycleDetector>,
}

impl Scheduler {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            pacing: DEFAULT_PACING,
            running: true,
            last_advance: None,
            cycles: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Pause automatically once a generation repeats within `window`.
    pub fn with_cycle_detection(mut self, window: usize) -> Self {
        let mut detector = CycleDetector::new(window);
        detector.observe(self.engine.fingerprint());
        self.cycles = Some(detector);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    pub fn set_pacing(&mut self, pacing: Duration) {
        self.pacing = pacing;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Swap in a new engine (e.g. a reseed) and forget cycle history.
    pub fn replace_engine(&mut self, engine: Engine) {
        self.engine = engine;
        self.last_advance = None;
        if let Some(detector) = self.cycles.as_mut() {
            detector.reset();
            detector.observe(self.engine.fingerprint());
        }
    }

    /// Present the current generation, then advance unconditionally.
    ///
    /// For hosts whose own timer already spaces frames by the pacing.
    pub fn frame<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> LifeResult<Step> {
        presenter.present(&self.engine)?;
        if !self.running {
            return Ok(Step::Paused);
        }
        Ok(self.advance(Instant::now()))
    }

    /// Present the current generation, then advance only if the pacing has
    /// elapsed since the previous advance.
    pub fn frame_paced<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
        now: Instant,
    ) -> LifeResult<Step> {
        presenter.present(&self.engine)?;
        if !self.running {
            return Ok(Step::Paused);
        }
        if let Some(last) = self.last_advance {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.pacing {
                return Ok(Step::Waiting {
                    remaining: self.pacing - elapsed,
                });
            }
        }
        Ok(self.advance(now))
    }

    /// Advance once, ignoring pause and pacing.
    pub fn step(&mut self) -> Step {
        self.advance(Instant::now())
    }

    fn advance(&mut self, now: Instant) -> Step {
        if self.engine.generation() < SNAPSHOT_GENERATIONS {
            debug!(
                generation = self.engine.generation(),
                "snapshot\n{}",
                self.engine
            );
        }

        self.engine.iterate();
        self.last_advance = Some(now);
        let generation = self.engine.generation();

        if let Some(detector) = self.cycles.as_mut() {
            if detector.observe(self.engine.fingerprint()) {
                info!(generation, "generation repeats a recent one, pausing");
                self.running = false;
                return Step::CycleDetected { generation };
            }
        }
        Step::Advanced { generation }
    }
}
