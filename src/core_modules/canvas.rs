// THEORY:
// The `canvas` module is the boundary between the pipeline and whatever
// actually puts pixels on screen. Render modes speak a small 2D paint
// vocabulary (rects, lines, circles, polygons, gradient fills, two blend
// modes); the host supplies a `Canvas` implementation that maps those calls
// onto its real surface. The pipeline never touches device-pixel-ratio
// scaling, resizing, or surface creation.
//
// `RecordingCanvas` is the reference implementation: it captures the paint
// calls as a `PaintOp` display list. Hosts can replay the list against a real
// surface, and tests can assert on it directly (two modes render identically
// iff they record identical lists).

/// A color in either HSL (gradient stops) or RGB (ink) form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f32, s: f32, l: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

/// The near-black ink used by the figure renderers.
pub const INK: Color = Color::Rgb { r: 17, g: 17, b: 17 };
/// A slightly softer ink used by the bar renderers.
pub const INK_SOFT: Color = Color::Rgb { r: 34, g: 34, b: 34 };
/// Full black, used by the motion circles overlay.
pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    /// Lightening blend used by the second gradient pass.
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0,1]`.
    pub offset: f32,
    pub color: Color,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    LinearGradient {
        from: (f32, f32),
        to: (f32, f32),
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: (f32, f32),
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

/// A fill plus global alpha and blend mode, the unit every draw call takes.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub fill: Fill,
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            fill: Fill::Solid(color),
            alpha: 1.0,
            blend: BlendMode::SourceOver,
        }
    }

    /// Global alpha, clamped to `[0,1]` the way a browser canvas clamps it
    /// (some presets deliberately configure layer opacities above 1.0).
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear,
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        paint: Paint,
    },
    StrokeLine {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        width: f32,
        paint: Paint,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        paint: Paint,
    },
    StrokeCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        width: f32,
        paint: Paint,
    },
    FillPolygon {
        points: Vec<(f32, f32)>,
        paint: Paint,
    },
}

/// The drawable surface the host hands to the pipeline. Dimensions are the
/// surface's logical pixel size.
pub trait Canvas {
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, paint: Paint);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, paint: Paint);
    fn fill_polygon(&mut self, points: Vec<(f32, f32)>, paint: Paint);
}

/// Records draw calls as a display list instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pub ops: Vec<PaintOp>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Drains the recorded list, leaving the canvas empty for the next tick.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(PaintOp::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint) {
        self.ops.push(PaintOp::FillRect { x, y, w, h, paint });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, paint: Paint) {
        self.ops.push(PaintOp::StrokeLine {
            x0,
            y0,
            x1,
            y1,
            width,
            paint,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        self.ops.push(PaintOp::FillCircle {
            cx,
            cy,
            radius,
            paint,
        });
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, paint: Paint) {
        self.ops.push(PaintOp::StrokeCircle {
            cx,
            cy,
            radius,
            width,
            paint,
        });
    }

    fn fill_polygon(&mut self, points: Vec<(f32, f32)>, paint: Paint) {
        self.ops.push(PaintOp::FillPolygon { points, paint });
    }
}
