// THEORY:
// This file is the main entry point for the `motion_canvas` library crate.
// It exposes the high-level surface an embedding host needs: the `Pipeline`
// driver and its `PipelineConfig`, the `CaptureSource` and `Canvas`
// collaborator traits, the `Mode` registry, and the async `FrameLoop`
// scheduler. The analysis internals live in `core_modules` and stay behind
// this facade.
//
// The pipeline itself is host-agnostic: it polls frames from whatever
// implements `CaptureSource`, and paints through whatever implements
// `Canvas`. Acquiring the video stream, sizing the surface, and wiring
// keyboard input to `set_mode` are the host's job.

pub mod capture;
pub mod config;
pub mod core_modules;
pub mod pipeline;

pub use capture::{CaptureSource, FrameSequence};
pub use config::PipelineConfig;
pub use core_modules::canvas::{Canvas, Paint, PaintOp, RecordingCanvas};
pub use core_modules::renderers::Mode;
pub use pipeline::{DriverState, FrameLoop, LoopControl, Pipeline, TickOutcome};
