//! 2D layers drawn around the depth-sorted geometry: ambient glow and ground
//! shadow underneath it, the screen panel contents and slot ring on top.

use crate::camera::{CameraState, Viewport};
use crate::math::{mean, pulse};
use crate::scene::{
    BIN_H, BIN_Y, SCREEN_H, SCREEN_W, SCREEN_X, SCREEN_Y, SCREEN_Z, SLOT_D, SLOT_W, SLOT_X,
    SLOT_Y, SLOT_Z,
};
use crate::surface::{
    fade, Baseline, FontKind, Paint, RadialGlow, Surface, TextAlign, TextStyle,
};
use crate::trash::LastSorted;
use druid::kurbo::{Point, Rect, Vec2};
use druid::Color;

const ACCENT: Color = Color::rgb8(0x00, 0xff, 0x88);
const SCREEN_BACKGROUND: Color = Color::rgb8(0x02, 0x0d, 0x04);

// Independent pulse frequencies, in radians per frame
const QR_PULSE_FREQUENCY: f64 = 0.07;
const BORDER_PULSE_FREQUENCY: f64 = 0.055;
const SLOT_PULSE_FREQUENCY: f64 = 0.05;

const AMBIENT_RADIUS: f64 = 230.0;

/// Fixed "QR-like" pattern shown on the screen, row-major
const QR_PATTERN: [[u8; 8]; 8] = [
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 0, 1, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [0, 0, 0, 1, 1, 0, 0, 0],
    [1, 1, 0, 1, 0, 1, 0, 1],
    [0, 1, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 1, 0, 1, 1, 0],
];
const QR_CELL: f64 = 3.5;
const QR_INSET: f64 = 7.0;
const QR_LABEL: &str = "SCAN ME";

fn transparent_accent(alpha: f64) -> Color {
    ACCENT.with_alpha(alpha)
}

/// Faint accent glow behind everything
pub fn draw_ambient(surface: &mut dyn Surface, viewport: &Viewport) {
    let glow = RadialGlow::centered(
        viewport.center(),
        AMBIENT_RADIUS,
        vec![(0.0, transparent_accent(0.025)), (1.0, transparent_accent(0.0))],
    );
    surface.fill_rect(viewport.size().to_rect(), &Paint::Glow(glow));
}

/// Elliptical glow on the floor below the bin, scaled with zoom
pub fn draw_shadow(surface: &mut dyn Surface, camera: &CameraState, viewport: &Viewport) {
    let base = viewport.project(camera, [0.0, BIN_Y + BIN_H + 14.0, 0.0]).point();
    let zoom = camera.zoom();
    let glow = RadialGlow::centered(
        base,
        110.0 * zoom,
        vec![
            (0.0, transparent_accent(0.10)),
            (0.5, transparent_accent(0.03)),
            (1.0, transparent_accent(0.0)),
        ],
    );
    surface.save();
    surface.fill_ellipse(base, Vec2::new(130.0 * zoom, 26.0 * zoom), &Paint::Glow(glow));
    surface.restore();
}

/// Screen panel contents, locked to the projected front face of the panel
pub fn draw_screen_overlay(
    surface: &mut dyn Surface,
    camera: &CameraState,
    viewport: &Viewport,
    frame: u64,
    last_sorted: Option<&LastSorted>,
) {
    let corners = [
        [SCREEN_X, SCREEN_Y, SCREEN_Z],
        [SCREEN_X + SCREEN_W, SCREEN_Y, SCREEN_Z],
        [SCREEN_X + SCREEN_W, SCREEN_Y + SCREEN_H, SCREEN_Z],
        [SCREEN_X, SCREEN_Y + SCREEN_H, SCREEN_Z],
    ]
    .map(|corner| viewport.project(camera, corner).point());
    let [p1, p2, _, p4] = corners;
    let mid = Point::new(
        mean(corners.iter().map(|p| p.x)),
        mean(corners.iter().map(|p| p.y)),
    );
    let sc = ((p2.x - p1.x) / SCREEN_W).abs();

    surface.save();
    surface.clip(&corners);
    surface.fill_polygon(&corners, &Paint::Solid(SCREEN_BACKGROUND));

    let glow = RadialGlow {
        origin: Point::new(mid.x, mid.y - 4.0 * sc),
        center: mid,
        radius: 55.0 * sc,
        stops: vec![
            (0.0, transparent_accent(0.18)),
            (0.7, transparent_accent(0.04)),
            (1.0, transparent_accent(0.0)),
        ],
    };
    surface.fill_rect(
        Rect::from_origin_size(p1, (p2.x - p1.x, p4.y - p1.y)),
        &Paint::Glow(glow),
    );

    draw_qr(surface, p1, sc, frame);
    if let Some(last) = last_sorted {
        if let Some(alpha) = last.badge_alpha() {
            draw_badge(surface, last, alpha, p1, p2, sc);
        }
    }

    let border = transparent_accent(pulse(0.28, 0.18, frame, BORDER_PULSE_FREQUENCY));
    surface.stroke_polygon(&corners, &border, 1.2);
    surface.restore();
}

fn draw_qr(surface: &mut dyn Surface, top_left: Point, sc: f64, frame: u64) {
    let cell = QR_CELL * sc;
    let left = top_left.x + QR_INSET * sc;
    let top = top_left.y + QR_INSET * sc;

    surface.set_alpha(pulse(0.65, 0.35, frame, QR_PULSE_FREQUENCY));
    for (row, cells) in QR_PATTERN.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if filled == 1 {
                let origin = Point::new(left + col as f64 * cell, top + row as f64 * cell);
                surface.fill_rect(
                    Rect::from_origin_size(origin, (cell - 0.4, cell - 0.4)),
                    &Paint::Solid(ACCENT),
                );
            }
        }
    }
    surface.set_alpha(1.0);

    surface.fill_text(
        QR_LABEL,
        Point::new(left + 4.0 * cell, top + 8.0 * cell + 3.0 * sc),
        &TextStyle {
            size: (6.5 * sc * 6.0).max(6.0),
            bold: true,
            font: FontKind::Mono,
            align: TextAlign::Center,
            baseline: Baseline::Alphabetic,
            color: transparent_accent(0.75),
        },
    );
}

fn draw_badge(
    surface: &mut dyn Surface,
    last: &LastSorted,
    alpha: f64,
    top_left: Point,
    top_right: Point,
    sc: f64,
) {
    let color = &last.kind.color;
    let anchor = Point::new(top_right.x - 14.0 * sc, top_left.y + 14.0 * sc);
    let (width, height) = (38.0 * sc, 13.0 * sc);

    surface.set_alpha(alpha);
    surface.fill_rounded_rect(
        Rect::from_origin_size((anchor.x - width / 2.0, anchor.y), (width, height)),
        4.0,
        &Paint::Solid(fade(color, 0.2)),
    );
    let text = |size: f64| TextStyle {
        size,
        bold: true,
        font: FontKind::Sans,
        align: TextAlign::Center,
        baseline: Baseline::Alphabetic,
        color: color.clone(),
    };
    surface.fill_text(
        last.kind.glyph,
        Point::new(anchor.x, anchor.y + height * 1.8),
        &text((6.0 * sc * 5.0).max(6.0)),
    );
    surface.fill_text(
        last.kind.category,
        Point::new(anchor.x, anchor.y + height * 0.75),
        &text((5.0 * sc * 5.0).max(5.0)),
    );

    surface.set_alpha(alpha * 0.5);
    surface.fill_rect(
        Rect::from_origin_size(
            (top_left.x + (top_right.x - top_left.x) * 0.55, top_left.y + 5.0 * sc),
            (1.0, SCREEN_H * sc * 0.7),
        ),
        &Paint::Solid(color.clone()),
    );
    surface.set_alpha(1.0);
}

/// Pulsing outline just outside the slot opening
pub fn draw_slot_glow(surface: &mut dyn Surface, camera: &CameraState, viewport: &Viewport, frame: u64) {
    let ring = [
        [SLOT_X - 1.0, SLOT_Y, SLOT_Z - 1.0],
        [SLOT_X + SLOT_W + 1.0, SLOT_Y, SLOT_Z - 1.0],
        [SLOT_X + SLOT_W + 1.0, SLOT_Y, SLOT_Z + SLOT_D + 1.0],
        [SLOT_X - 1.0, SLOT_Y, SLOT_Z + SLOT_D + 1.0],
    ]
    .map(|corner| viewport.project(camera, corner).point());
    let color = transparent_accent(pulse(0.22, 0.15, frame, SLOT_PULSE_FREQUENCY));
    surface.save();
    surface.stroke_polygon(&ring, &color, 1.5);
    surface.restore();
}
