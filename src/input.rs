//! Pointer, touch and wheel input mapped onto the orbit camera.

use crate::camera::CameraState;
use druid::kurbo::Point;

/// Drag tracking for the orbit camera
#[derive(Clone, Debug, Default)]
pub struct InputController {
    /// Last pointer position while a drag is in progress
    drag: Option<Point>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag; deltas are measured from `pos`
    pub fn pointer_down(&mut self, pos: Point) {
        self.drag = Some(pos);
    }

    /// Orbits the camera by the distance moved since the last event.
    /// Returns whether the camera changed.
    pub fn pointer_move(&mut self, pos: Point, camera: &mut CameraState) -> bool {
        let Some(last) = self.drag else {
            return false;
        };
        camera.orbit(pos.x - last.x, pos.y - last.y);
        self.drag = Some(pos);
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Wheel deltas zoom the camera; the host should not scroll the page
    pub fn wheel(&mut self, delta_y: f64, camera: &mut CameraState) {
        camera.zoom_by(delta_y);
    }

    pub fn touch_start(&mut self, touches: &[Point]) {
        if let Some(first) = touches.first() {
            self.pointer_down(*first);
        }
    }

    pub fn touch_move(&mut self, touches: &[Point], camera: &mut CameraState) -> bool {
        match touches.first() {
            Some(first) => self.pointer_move(*first, camera),
            None => false,
        }
    }

    pub fn touch_end(&mut self) {
        self.pointer_up();
    }
}
