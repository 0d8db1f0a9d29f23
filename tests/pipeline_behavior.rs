// End-to-end behavior of the full pipeline: capture → sample → luminance →
// motion → features → render, driven through the public API only.

use image::{Rgba, RgbaImage};
use motion_canvas::{
    DriverState, FrameSequence, Mode, Pipeline, PipelineConfig, RecordingCanvas, TickOutcome,
};

fn solid(value: u8) -> RgbaImage {
    RgbaImage::from_pixel(320, 180, Rgba([value, value, value, 255]))
}

/// A bright square sliding across a dark background.
fn moving_square_clip(frames: u32) -> Vec<RgbaImage> {
    (0..frames)
        .map(|t| {
            let left = 20 + t * 12;
            RgbaImage::from_fn(320, 180, |x, y| {
                let inside = x >= left && x < left + 40 && y >= 70 && y < 110;
                if inside {
                    Rgba([240, 240, 240, 255])
                } else {
                    Rgba([20, 20, 20, 255])
                }
            })
        })
        .collect()
}

fn pipeline_over(frames: Vec<RgbaImage>) -> Pipeline<FrameSequence> {
    Pipeline::new(PipelineConfig::video_preset(), FrameSequence::new(frames))
}

#[test]
fn static_stream_settles_to_silence() {
    // Identical frames forever: motion stays zero, quadrants stay zero, and
    // the default composite mode paints only its two background gradients.
    let mut pipeline = pipeline_over(vec![solid(90); 4]);
    let mut canvas = RecordingCanvas::new(640.0, 360.0);

    for _ in 0..4 {
        assert_eq!(pipeline.tick(&mut canvas), TickOutcome::Rendered);
    }

    assert!(pipeline.motion().iter().all(|m| *m == 0.0));
    let regions = pipeline.regions();
    assert_eq!(regions.left(), 0.0);
    assert_eq!(regions.right(), 0.0);

    // Per tick: clear + horizontal gradient + vertical gradient, no strokes.
    let ops = canvas.take_ops();
    assert_eq!(ops.len(), 4 * 3);
}

#[test]
fn moving_subject_raises_motion_and_luminance_stays_bounded() {
    let mut pipeline = pipeline_over(moving_square_clip(10));
    let mut canvas = RecordingCanvas::new(640.0, 360.0);

    let mut peak_motion = 0.0f32;
    while pipeline.tick(&mut canvas) == TickOutcome::Rendered {
        peak_motion = pipeline
            .motion()
            .iter()
            .fold(peak_motion, |acc, m| acc.max(*m));
    }

    assert!(peak_motion > 0.0, "a moving subject must register motion");
    assert_eq!(pipeline.state(), DriverState::Idle); // clip exhausted
    assert_eq!(pipeline.frames_processed(), 10);
}

#[test]
fn grids_have_one_value_per_cell_in_range() {
    let config = PipelineConfig::video_preset();
    let cells = config.cell_count();
    let mut pipeline = Pipeline::new(config, FrameSequence::new(moving_square_clip(3)));
    let mut canvas = RecordingCanvas::new(640.0, 360.0);

    pipeline.tick(&mut canvas);
    pipeline.tick(&mut canvas);

    assert_eq!(pipeline.luminance().len(), cells);
    assert_eq!(pipeline.motion().len(), cells);
    assert!(
        pipeline
            .luminance()
            .iter()
            .all(|l| (0.0..=255.0).contains(l))
    );
    assert!(pipeline.motion().iter().all(|m| *m >= 0.0));
}

#[test]
fn unknown_mode_key_renders_exactly_like_the_default() {
    let clip = moving_square_clip(6);

    let mut defaulted = pipeline_over(clip.clone());
    let mut fallback = pipeline_over(clip);
    fallback.set_mode_key("definitely-not-registered");

    let mut canvas_a = RecordingCanvas::new(640.0, 360.0);
    let mut canvas_b = RecordingCanvas::new(640.0, 360.0);
    for _ in 0..6 {
        defaulted.tick(&mut canvas_a);
        fallback.tick(&mut canvas_b);
    }

    assert_eq!(canvas_a.ops, canvas_b.ops);
}

#[test]
fn mode_switching_never_disturbs_upstream_state() {
    // One pipeline stays in the default mode, the other flips through every
    // mode while consuming the same clip. Grids and quadrant state must end
    // identical: renderers are pure consumers.
    let clip = moving_square_clip(9);

    let mut steady = pipeline_over(clip.clone());
    let mut flipping = pipeline_over(clip);

    let mut canvas_a = RecordingCanvas::new(640.0, 360.0);
    let mut canvas_b = RecordingCanvas::new(640.0, 360.0);
    for (i, mode) in Mode::ALL.into_iter().enumerate() {
        assert_eq!(steady.tick(&mut canvas_a), TickOutcome::Rendered, "tick {i}");
        flipping.set_mode(mode);
        assert_eq!(flipping.tick(&mut canvas_b), TickOutcome::Rendered, "tick {i}");
    }

    assert_eq!(steady.luminance(), flipping.luminance());
    assert_eq!(steady.motion(), flipping.motion());
    assert_eq!(steady.regions().left(), flipping.regions().left());
    assert_eq!(steady.regions().right(), flipping.regions().right());
    assert_eq!(steady.regions().top(), flipping.regions().top());
    assert_eq!(steady.regions().bottom(), flipping.regions().bottom());
}

#[test]
fn every_mode_renders_a_moving_clip_without_panicking() {
    for mode in Mode::ALL {
        let mut pipeline = pipeline_over(moving_square_clip(5));
        pipeline.set_mode(mode);
        let mut canvas = RecordingCanvas::new(640.0, 360.0);
        for _ in 0..5 {
            assert_eq!(pipeline.tick(&mut canvas), TickOutcome::Rendered);
        }
        // Every tick starts with a clear, whatever the mode.
        assert_eq!(canvas.ops.first(), Some(&motion_canvas::PaintOp::Clear));
    }
}

#[test]
fn stop_then_restart_with_a_fresh_source() {
    let mut pipeline = pipeline_over(moving_square_clip(4));
    let mut canvas = RecordingCanvas::new(640.0, 360.0);

    pipeline.tick(&mut canvas);
    pipeline.tick(&mut canvas);
    assert!(pipeline.motion().iter().any(|m| *m > 0.0));

    pipeline.stop(&mut canvas);
    assert_eq!(pipeline.state(), DriverState::Idle);
    assert!(pipeline.motion().is_empty());

    // Remaining frames in the same source: the driver comes back up and the
    // first tick after the restart reports zero motion again.
    assert_eq!(pipeline.tick(&mut canvas), TickOutcome::Rendered);
    assert_eq!(pipeline.state(), DriverState::Running);
    assert!(pipeline.motion().iter().all(|m| *m == 0.0));
}
