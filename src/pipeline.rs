// THEORY:
// The `pipeline` module is the top-level API: a `Pipeline` owns the capture
// source, every stage's state, and the active render mode, and advances the
// whole thing one tick at a time. Grid buffers, quadrant state and
// previous-frame history all live in this one struct rather than in ambient
// globals, and scheduling is an explicit interval loop (`FrameLoop`) gated by
// the Idle/Running state machine rather than a self-rescheduling callback
// chain.
//
// Key architectural principles:
// 1.  **Strict downstream flow**: each tick runs sample → luminance → motion
//     → features → render, to completion, single-threaded. The only
//     suspension point is the wait for the next interval tick.
// 2.  **Atomic ticks**: a tick either applies all of its state updates or
//     none (skipped ticks mutate nothing). Stop is level-triggered: it clears
//     state and blanks the canvas but never interrupts a tick in flight.
// 3.  **No fatal paths**: a not-ready source skips the tick, a lost source
//     stops the driver, an unknown mode key was already defaulted at the
//     parse boundary. Nothing in here returns an error.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::capture::CaptureSource;
use crate::config::PipelineConfig;
use crate::core_modules::canvas::Canvas;
use crate::core_modules::luminance;
use crate::core_modules::motion::MotionEstimator;
use crate::core_modules::regions::RegionalMotion;
use crate::core_modules::renderers::{self, FrameView, Mode};
use crate::core_modules::sampler;

/// The driver's two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No active source; ticks do nothing.
    Idle,
    /// Source attached and ticking.
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still idle; the source has not produced a valid frame yet.
    Idle,
    /// Running, but the source reported a zero-sized frame; nothing mutated.
    Skipped,
    /// A full pipeline pass ran and the canvas was painted.
    Rendered,
    /// The source disappeared; state was cleared and the driver went idle.
    SourceLost,
}

/// The full visualization pipeline: capture source, per-tick grids, motion
/// history, quadrant state, and the active render mode.
pub struct Pipeline<S: CaptureSource> {
    config: PipelineConfig,
    source: S,
    mode: Mode,
    state: DriverState,
    estimator: MotionEstimator,
    regions: RegionalMotion,
    luminance: Vec<f32>,
    motion: Vec<f32>,
    frames_processed: u64,
}

impl<S: CaptureSource> Pipeline<S> {
    pub fn new(config: PipelineConfig, source: S) -> Self {
        let estimator = MotionEstimator::new(config.smoothing);
        let regions = RegionalMotion::new(config.region_smoothing);
        Self {
            config,
            source,
            mode: Mode::default(),
            state: DriverState::Idle,
            estimator,
            regions,
            luminance: Vec::new(),
            motion: Vec::new(),
            frames_processed: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::info!(from = self.mode.key(), to = mode.key(), "mode switch");
            self.mode = mode;
        }
    }

    /// Accepts an untrusted mode identifier; unknown keys select the default.
    pub fn set_mode_key(&mut self, key: &str) {
        self.set_mode(Mode::from_key_or_default(key));
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Last tick's luminance grid (empty before the first rendered tick).
    pub fn luminance(&self) -> &[f32] {
        &self.luminance
    }

    /// Last tick's motion grid (empty before the first rendered tick).
    pub fn motion(&self) -> &[f32] {
        &self.motion
    }

    pub fn regions(&self) -> &RegionalMotion {
        &self.regions
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Runs one pipeline pass. Safe to call regardless of state; the outcome
    /// reports what actually happened.
    pub fn tick(&mut self, canvas: &mut dyn Canvas) -> TickOutcome {
        let dims = self.source.frame_dimensions();
        match (self.state, dims) {
            (DriverState::Idle, None) => TickOutcome::Idle,
            (DriverState::Idle, Some((w, h))) if w == 0 || h == 0 => TickOutcome::Idle,
            (DriverState::Idle, Some((w, h))) => {
                tracing::info!(width = w, height = h, "capture ready, driver running");
                self.state = DriverState::Running;
                self.run_tick(canvas)
            }
            (DriverState::Running, None) => {
                tracing::info!("capture lost, driver idling");
                self.halt(canvas);
                TickOutcome::SourceLost
            }
            (DriverState::Running, Some((w, h))) if w == 0 || h == 0 => {
                tracing::trace!("zero-sized frame, tick skipped");
                TickOutcome::Skipped
            }
            (DriverState::Running, Some(_)) => self.run_tick(canvas),
        }
    }

    /// Explicit stop: clear all persistent state, blank the canvas, go idle.
    pub fn stop(&mut self, canvas: &mut dyn Canvas) {
        if self.state == DriverState::Running {
            tracing::info!("driver stopped");
        }
        self.halt(canvas);
    }

    fn halt(&mut self, canvas: &mut dyn Canvas) {
        self.estimator.reset();
        self.regions.reset();
        self.luminance.clear();
        self.motion.clear();
        canvas.clear();
        self.state = DriverState::Idle;
    }

    fn run_tick(&mut self, canvas: &mut dyn Canvas) -> TickOutcome {
        let cols = self.config.cols.max(1);
        let rows = self.config.rows();

        let sampled = match self.source.frame() {
            Some(frame) => sampler::sample_frame(frame, cols, rows),
            None => None,
        };
        let Some(sampled) = sampled else {
            return TickOutcome::Skipped;
        };

        let lum = luminance::luminance_grid(&sampled);
        let motion = self.estimator.advance(&lum);
        self.regions
            .advance(&motion, cols as usize, rows as usize);

        let view = FrameView {
            lum: &lum,
            motion: &motion,
            cols: cols as usize,
            rows: rows as usize,
        };
        renderers::render(self.mode, &view, &self.regions, &self.config, canvas);

        self.luminance = lum;
        self.motion = motion;
        self.frames_processed += 1;
        TickOutcome::Rendered
    }
}

/// Control handle for a running `FrameLoop`.
pub struct LoopControl {
    running_tx: watch::Sender<bool>,
    mode_tx: watch::Sender<Mode>,
}

impl LoopControl {
    /// Level-triggered stop: the loop finishes its current tick, clears
    /// state, and returns.
    pub fn stop(&self) {
        let _ = self.running_tx.send(false);
    }

    pub fn set_mode(&self, mode: Mode) {
        let _ = self.mode_tx.send(mode);
    }
}

/// The explicit scheduling loop: one pipeline tick per interval tick, with
/// mode and stop signals delivered through watch channels.
pub struct FrameLoop<S: CaptureSource, C: Canvas> {
    pipeline: Pipeline<S>,
    canvas: C,
    interval: Duration,
    running_rx: watch::Receiver<bool>,
    mode_rx: watch::Receiver<Mode>,
}

impl<S: CaptureSource, C: Canvas> FrameLoop<S, C> {
    pub fn new(
        pipeline: Pipeline<S>,
        canvas: C,
        frame_interval: Duration,
    ) -> (Self, LoopControl) {
        let (running_tx, running_rx) = watch::channel(true);
        let (mode_tx, mode_rx) = watch::channel(pipeline.current_mode());
        let frame_loop = Self {
            pipeline,
            canvas,
            interval: frame_interval,
            running_rx,
            mode_rx,
        };
        (
            frame_loop,
            LoopControl {
                running_tx,
                mode_tx,
            },
        )
    }

    /// Ticks until the source is lost, the control handle signals stop, or
    /// the control handle is dropped. Returns the pipeline and canvas so the
    /// host can inspect or restart them.
    pub async fn run(mut self) -> (Pipeline<S>, C) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mode = *self.mode_rx.borrow();
                    self.pipeline.set_mode(mode);
                    if self.pipeline.tick(&mut self.canvas) == TickOutcome::SourceLost {
                        break;
                    }
                }
                changed = self.running_rx.changed() => {
                    match changed {
                        Ok(()) if *self.running_rx.borrow() => {}
                        _ => break,
                    }
                }
            }
        }

        self.pipeline.stop(&mut self.canvas);
        (self.pipeline, self.canvas)
    }
}
