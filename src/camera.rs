//! Camera orientation and the perspective projection shared by every layer
//! of the scene.

use crate::math::{multiply_matrices, multiply_matrix_vector, pitch_matrix, yaw_matrix};
use crate::vertex::ScreenPoint;
use druid::kurbo::{Point, Size};

pub const MIN_PITCH: f64 = -0.3;
pub const MAX_PITCH: f64 = 0.45;
pub const MIN_ZOOM: f64 = 0.6;
pub const MAX_ZOOM: f64 = 1.7;

const INITIAL_YAW: f64 = 0.5;
const INITIAL_PITCH: f64 = 0.18;

/// Perspective strength; larger flattens the scene
const FIELD_OF_VIEW: f64 = 440.0;
/// Distance from the eye to the scene origin along Z
const CAMERA_DISTANCE: f64 = 380.0;
/// The bin sits slightly below the canvas centre
const VERTICAL_OFFSET: f64 = 25.0;
/// Smallest perspective denominator; keeps points behind the eye finite
const NEAR_LIMIT: f64 = 1.0;

const DRAG_YAW_SPEED: f64 = 0.012;
const DRAG_PITCH_SPEED: f64 = 0.006;
const WHEEL_ZOOM_SPEED: f64 = 0.001;
const IDLE_YAW_SPEED: f64 = 0.005;

/// Orbit camera state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Rotation about the vertical axis, unbounded
    pub yaw: f64,
    /// Rotation about the horizontal axis, within [MIN_PITCH, MAX_PITCH]
    pitch: f64,
    /// Scale factor, within [MIN_ZOOM, MAX_ZOOM]
    zoom: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        CameraState {
            yaw: INITIAL_YAW,
            pitch: INITIAL_PITCH,
            zoom: 1.0,
        }
    }
}

impl CameraState {
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Applies a pointer drag delta in screen pixels
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.yaw += dx * DRAG_YAW_SPEED;
        self.pitch = (self.pitch + dy * DRAG_PITCH_SPEED).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Applies a wheel delta; positive values zoom out
    pub fn zoom_by(&mut self, delta_y: f64) {
        self.zoom = (self.zoom - delta_y * WHEEL_ZOOM_SPEED).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Slow turntable spin applied while the user is not dragging
    pub fn idle_spin(&mut self) {
        self.yaw += IDLE_YAW_SPEED;
    }

    pub fn reset(&mut self) {
        *self = CameraState::default();
    }
}

/// The region of the drawing surface the scene is projected into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: Size,
}

impl Viewport {
    /// Returns `None` when there is nothing to draw into
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let drawable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        drawable.then(|| Viewport {
            size: Size::new(width, height),
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Projects an object-space point through the camera
    pub fn project(&self, camera: &CameraState, point: [f64; 3]) -> ScreenPoint {
        let rotation = multiply_matrices(&pitch_matrix(camera.pitch), &yaw_matrix(camera.yaw));
        let [rx, ry, rz] = multiply_matrix_vector(&rotation, &point);
        let d = FIELD_OF_VIEW / (FIELD_OF_VIEW + rz + CAMERA_DISTANCE).max(NEAR_LIMIT);
        let center = self.center();
        ScreenPoint {
            x: center.x + rx * d * camera.zoom,
            y: center.y + VERTICAL_OFFSET + ry * d * camera.zoom,
            depth: rz,
        }
    }
}
