use crate::math::mean;
use crate::surface::{Paint, Surface};
use crate::vertex::ScreenPoint;
use druid::kurbo::Point;
use druid::Color;
use std::cmp::Ordering;

/// Edge colour shared by every stroked face
const FACE_STROKE: Color = Color::rgba8(0, 255, 136, 23);
const FACE_STROKE_WIDTH: f64 = 0.8;

/// A flat-shaded polygon waiting to be painted
#[derive(Clone, Debug)]
pub struct Face {
    pub points: Vec<ScreenPoint>,
    pub color: Color,
    pub alpha: f64,
    pub stroke: bool,
    /// Mean depth of `points`
    pub depth: f64,
}

/// Collects faces for one frame and paints them back to front
#[derive(Debug, Default)]
pub struct FaceQueue {
    faces: Vec<Face>,
}

impl FaceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Drops anything left over from a previous frame
    pub fn reset(&mut self) {
        self.faces.clear();
    }

    pub fn queue_face(&mut self, points: Vec<ScreenPoint>, color: Color, alpha: f64, stroke: bool) {
        let depth = mean(points.iter().map(|p| p.depth));
        self.faces.push(Face {
            points,
            color,
            alpha,
            stroke,
            depth,
        });
    }

    /// Sorts farthest first, paints every face, and empties the queue.
    pub fn flush(&mut self, surface: &mut dyn Surface) {
        self.faces
            .sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
        for face in self.faces.drain(..) {
            if face.points.is_empty() {
                continue;
            }
            let outline: Vec<Point> = face.points.iter().map(ScreenPoint::point).collect();
            surface.save();
            surface.set_alpha(face.alpha);
            surface.fill_polygon(&outline, &Paint::Solid(face.color));
            if face.stroke {
                surface.stroke_polygon(&outline, &FACE_STROKE, FACE_STROKE_WIDTH);
            }
            surface.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Op, Recorder};
    use proptest::prelude::*;

    fn quad(depths: [f64; 4]) -> Vec<ScreenPoint> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &depth)| ScreenPoint {
                x: i as f64,
                y: i as f64 * 2.0,
                depth,
            })
            .collect()
    }

    fn painted_colors(recorder: &Recorder) -> Vec<Color> {
        recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::FillPolygon(_, Paint::Solid(color)) => Some(color.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn depth_is_mean_of_points() {
        let mut queue = FaceQueue::new();
        queue.queue_face(quad([1.0, 2.0, 3.0, 6.0]), Color::BLACK, 1.0, true);
        assert_eq!(queue.faces[0].depth, 3.0);
    }

    #[test]
    fn paints_farthest_first() {
        let near = Color::rgb8(1, 0, 0);
        let middle = Color::rgb8(2, 0, 0);
        let far = Color::rgb8(3, 0, 0);
        let mut queue = FaceQueue::new();
        queue.queue_face(quad([-10.0; 4]), near.clone(), 1.0, true);
        queue.queue_face(quad([50.0; 4]), far.clone(), 1.0, true);
        queue.queue_face(quad([5.0; 4]), middle.clone(), 1.0, false);

        let mut recorder = Recorder::new(100.0, 100.0);
        queue.flush(&mut recorder);

        assert_eq!(painted_colors(&recorder), vec![far, middle, near]);
        assert!(queue.is_empty());
    }

    #[test]
    fn stroke_flag_controls_outline() {
        let mut queue = FaceQueue::new();
        queue.queue_face(quad([0.0; 4]), Color::WHITE, 0.5, false);
        let mut recorder = Recorder::new(100.0, 100.0);
        queue.flush(&mut recorder);
        assert!(recorder.position(|op| matches!(op, Op::StrokePolygon(..))).is_none());
        assert!(recorder.ops.contains(&Op::Alpha(0.5)));
    }

    #[test]
    fn empty_faces_are_skipped() {
        let mut queue = FaceQueue::new();
        queue.queue_face(Vec::new(), Color::WHITE, 1.0, true);
        let mut recorder = Recorder::new(100.0, 100.0);
        queue.flush(&mut recorder);
        assert!(recorder.ops.is_empty());
        assert!(queue.is_empty());
    }

    proptest! {
        #[test]
        fn flush_order_is_non_increasing(depths in prop::collection::vec(-500.0f64..500.0, 0..40)) {
            let mut queue = FaceQueue::new();
            for (i, depth) in depths.iter().enumerate() {
                // encode the queue index in the colour so painted order can be mapped back
                let color = Color::rgb8((i % 256) as u8, (i / 256) as u8, 0);
                queue.queue_face(quad([*depth; 4]), color, 1.0, true);
            }
            let mut recorder = Recorder::new(100.0, 100.0);
            queue.flush(&mut recorder);

            let painted: Vec<f64> = painted_colors(&recorder)
                .iter()
                .map(|color| {
                    let (r, g, _, _) = color.as_rgba8();
                    depths[r as usize + g as usize * 256]
                })
                .collect();
            prop_assert_eq!(painted.len(), depths.len());
            for pair in painted.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
            prop_assert!(queue.is_empty());
        }
    }
}
