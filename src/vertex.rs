use druid::kurbo::Point;

/// A projected point: screen position plus the camera-space depth used for sorting
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Rotated Z before the perspective divide; larger is farther away
    pub depth: f64,
}

impl ScreenPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
