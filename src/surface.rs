//! The immediate-mode drawing contract the renderer paints through, and its
//! piet implementation.

use druid::kurbo::{Affine, BezPath, Ellipse, Point, Rect, RoundedRect, Size, Vec2};
use druid::piet::{
    FixedRadialGradient, FontFamily, FontWeight, GradientStop, RenderContext, Text, TextLayout,
    TextLayoutBuilder,
};
use druid::Color;
use tracing::warn;

/// Page background the canvas is cleared to
pub const BACKGROUND: Color = Color::rgb8(0x05, 0x0a, 0x06);

/// Radial gradient from `origin` (radius zero) out to a circle around `center`
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGlow {
    pub origin: Point,
    pub center: Point,
    pub radius: f64,
    pub stops: Vec<(f32, Color)>,
}

impl RadialGlow {
    pub fn centered(center: Point, radius: f64, stops: Vec<(f32, Color)>) -> Self {
        RadialGlow {
            origin: center,
            center,
            radius,
            stops,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Glow(RadialGlow),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontKind {
    Mono,
    Sans,
    Serif,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub font: FontKind,
    pub align: TextAlign,
    pub baseline: Baseline,
    pub color: Color,
}

/// A 2D drawing surface.
///
/// Alpha, transform and clip are part of the saved state: `restore` undoes
/// everything set since the matching `save`.
pub trait Surface {
    fn size(&self) -> Size;
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    /// Sets the opacity multiplier for subsequent draws
    fn set_alpha(&mut self, alpha: f64);
    fn transform(&mut self, affine: Affine);
    fn clip(&mut self, polygon: &[Point]);
    fn fill_polygon(&mut self, polygon: &[Point], paint: &Paint);
    fn stroke_polygon(&mut self, polygon: &[Point], color: &Color, width: f64);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);
    fn fill_ellipse(&mut self, center: Point, radii: Vec2, paint: &Paint);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// Builds a closed path through `points`
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Scales the alpha channel of `color`
pub fn fade(color: &Color, alpha: f64) -> Color {
    let (r, g, b, a) = color.as_rgba();
    Color::rgba(r, g, b, a * alpha)
}

/// Adapts a piet render context to [`Surface`]
pub struct PietSurface<'a, R: RenderContext> {
    ctx: &'a mut R,
    size: Size,
    alpha: f64,
    saved_alpha: Vec<f64>,
}

impl<'a, R: RenderContext> PietSurface<'a, R> {
    pub fn new(ctx: &'a mut R, size: Size) -> Self {
        PietSurface {
            ctx,
            size,
            alpha: 1.0,
            saved_alpha: Vec::new(),
        }
    }

    fn brush(&mut self, paint: &Paint) -> Option<R::Brush> {
        match paint {
            Paint::Solid(color) => {
                let color = fade(color, self.alpha);
                Some(self.ctx.solid_brush(color))
            }
            Paint::Glow(glow) => {
                let stops = glow
                    .stops
                    .iter()
                    .map(|(pos, color)| GradientStop {
                        pos: *pos,
                        color: fade(color, self.alpha),
                    })
                    .collect();
                let gradient = FixedRadialGradient {
                    center: glow.center,
                    origin_offset: glow.origin - glow.center,
                    radius: glow.radius,
                    stops,
                };
                match self.ctx.gradient(gradient) {
                    Ok(brush) => Some(brush),
                    Err(err) => {
                        warn!(%err, "could not create radial gradient");
                        None
                    }
                }
            }
        }
    }
}

impl<'a, R: RenderContext> Surface for PietSurface<'a, R> {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ctx.clear(self.size.to_rect(), BACKGROUND);
    }

    fn save(&mut self) {
        if let Err(err) = self.ctx.save() {
            warn!(%err, "could not save render state");
        }
        self.saved_alpha.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Err(err) = self.ctx.restore() {
            warn!(%err, "could not restore render state");
        }
        self.alpha = self.saved_alpha.pop().unwrap_or(1.0);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn transform(&mut self, affine: Affine) {
        self.ctx.transform(affine);
    }

    fn clip(&mut self, polygon: &[Point]) {
        self.ctx.clip(polygon_path(polygon));
    }

    fn fill_polygon(&mut self, polygon: &[Point], paint: &Paint) {
        if let Some(brush) = self.brush(paint) {
            self.ctx.fill(polygon_path(polygon), &brush);
        }
    }

    fn stroke_polygon(&mut self, polygon: &[Point], color: &Color, width: f64) {
        let color = fade(color, self.alpha);
        self.ctx.stroke(polygon_path(polygon), &color, width);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        if let Some(brush) = self.brush(paint) {
            self.ctx.fill(rect, &brush);
        }
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        if let Some(brush) = self.brush(paint) {
            self.ctx.fill(RoundedRect::from_rect(rect, radius), &brush);
        }
    }

    fn fill_ellipse(&mut self, center: Point, radii: Vec2, paint: &Paint) {
        if let Some(brush) = self.brush(paint) {
            self.ctx.fill(Ellipse::new(center, radii, 0.0), &brush);
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let family = match style.font {
            FontKind::Mono => FontFamily::MONOSPACE,
            FontKind::Sans => FontFamily::SANS_SERIF,
            FontKind::Serif => FontFamily::SERIF,
        };
        let weight = if style.bold {
            FontWeight::BOLD
        } else {
            FontWeight::NORMAL
        };
        let color = fade(&style.color, self.alpha);
        let layout = self
            .ctx
            .text()
            .new_text_layout(text.to_owned())
            .font(family, style.size)
            .default_attribute(weight)
            .text_color(color)
            .build();
        let layout = match layout {
            Ok(layout) => layout,
            Err(err) => {
                warn!(%err, text, "could not lay out text");
                return;
            }
        };
        let size = layout.size();
        let x = match style.align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - size.width / 2.0,
        };
        let y = match style.baseline {
            Baseline::Alphabetic => {
                at.y - layout
                    .line_metric(0)
                    .map(|metric| metric.baseline)
                    .unwrap_or(size.height)
            }
            Baseline::Middle => at.y - size.height / 2.0,
        };
        self.ctx.draw_text(&layout, Point::new(x, y));
    }
}
