//! Fixed geometry of the bin and the box primitives it is built from.
//!
//! Object space is centred on the bin body with +Y pointing down and -Z
//! facing the viewer at zero yaw.

use crate::camera::{CameraState, Viewport};
use crate::graphics::FaceQueue;
use crate::vertex::ScreenPoint;
use druid::Color;
use tracing::trace_span;

// Body
pub const BIN_W: f64 = 160.0;
pub const BIN_H: f64 = 220.0;
pub const BIN_D: f64 = 120.0;
pub const BIN_X: f64 = -BIN_W / 2.0;
pub const BIN_Y: f64 = -BIN_H / 2.0;
pub const BIN_Z: f64 = -BIN_D / 2.0;

// Lid overhangs the body by 6 on every side
pub const LID_W: f64 = BIN_W + 12.0;
pub const LID_H: f64 = 30.0;
pub const LID_D: f64 = BIN_D + 12.0;
pub const LID_X: f64 = BIN_X - 6.0;
pub const LID_Y: f64 = BIN_Y - LID_H;
pub const LID_Z: f64 = BIN_Z - 6.0;

// Screen panel embedded in the front face
pub const SCREEN_W: f64 = 88.0;
pub const SCREEN_H: f64 = 68.0;
pub const SCREEN_X: f64 = -SCREEN_W / 2.0;
pub const SCREEN_Y: f64 = BIN_Y + 22.0;
pub const SCREEN_Z: f64 = BIN_Z - 2.0;

// Trash slot on top of the lid
pub const SLOT_W: f64 = 58.0;
pub const SLOT_D: f64 = 14.0;
pub const SLOT_H: f64 = 10.0;
pub const SLOT_X: f64 = -SLOT_W / 2.0;
pub const SLOT_Y: f64 = LID_Y - SLOT_H;
pub const SLOT_Z: f64 = -SLOT_D * 0.8;

const BODY_FRONT: Color = Color::rgb8(0x1b, 0x3d, 0x20);
const BODY_BACK: Color = Color::rgb8(0x0f, 0x24, 0x12);
const BODY_SIDE: Color = Color::rgb8(0x16, 0x2e, 0x1a);
const BODY_TOP: Color = Color::rgb8(0x0e, 0x1f, 0x11);
const BODY_BOTTOM: Color = Color::rgb8(0x08, 0x0d, 0x08);
const LID_FRONT: Color = Color::rgb8(0x22, 0x58, 0x2a);
const LID_BACK: Color = Color::rgb8(0x17, 0x2f, 0x1d);
const LID_SIDE: Color = Color::rgb8(0x1b, 0x44, 0x22);
const LID_TOP: Color = Color::rgb8(0x2a, 0x68, 0x32);
const BEZEL_FRONT: Color = Color::rgb8(0x09, 0x16, 0x09);
const BEZEL_SIDE: Color = Color::rgb8(0x06, 0x0e, 0x07);
const SLOT_TOP: Color = Color::rgb8(0x01, 0x06, 0x03);
const SLOT_SIDE: Color = Color::rgb8(0x02, 0x0a, 0x05);
const ACCENT_FRONT: Color = Color::rgba8(0x00, 0xff, 0x88, 0x26);
const ACCENT_REST: Color = Color::rgba8(0x00, 0xff, 0x88, 0x10);

/// An axis-aligned box: corner, extent and one colour per face in
/// front, back, left, right, top, bottom order.
#[derive(Clone, Debug)]
pub struct BoxPrimitive {
    pub name: &'static str,
    pub origin: [f64; 3],
    pub size: [f64; 3],
    pub colors: [Color; 6],
}

/// Corner indices of each face, in the same order as `BoxPrimitive::colors`
const BOX_FACES: [[usize; 4]; 6] = [
    [4, 5, 6, 7],
    [0, 1, 2, 3],
    [0, 4, 7, 3],
    [1, 5, 6, 2],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
];

impl BoxPrimitive {
    fn corners(&self) -> [[f64; 3]; 8] {
        let [x, y, z] = self.origin;
        let [w, h, d] = self.size;
        [
            [x, y, z],
            [x + w, y, z],
            [x + w, y + h, z],
            [x, y + h, z],
            [x, y, z + d],
            [x + w, y, z + d],
            [x + w, y + h, z + d],
            [x, y + h, z + d],
        ]
    }

    /// Projects the eight corners once and queues the six faces separately,
    /// so faces of different boxes can interleave in the depth sort.
    pub fn queue(&self, queue: &mut FaceQueue, camera: &CameraState, viewport: &Viewport) {
        let projected = self.corners().map(|corner| viewport.project(camera, corner));
        for (indices, color) in BOX_FACES.iter().zip(self.colors.iter()) {
            let points = indices.iter().map(|&i| projected[i]).collect();
            queue.queue_face(points, color.clone(), 1.0, true);
        }
    }
}

/// The eight boxes that make up the bin, in emission order
pub fn scene_boxes() -> [BoxPrimitive; 8] {
    [
        BoxPrimitive {
            name: "base slab",
            origin: [BIN_X - 12.0, BIN_Y + BIN_H, BIN_Z - 12.0],
            size: [BIN_W + 24.0, 12.0, BIN_D + 24.0],
            colors: [
                Color::rgb8(0x14, 0x26, 0x18),
                Color::rgb8(0x0a, 0x1a, 0x0e),
                Color::rgb8(0x0e, 0x20, 0x14),
                Color::rgb8(0x0e, 0x20, 0x14),
                Color::rgb8(0x1a, 0x30, 0x20),
                Color::rgb8(0x08, 0x0d, 0x09),
            ],
        },
        BoxPrimitive {
            name: "body",
            origin: [BIN_X, BIN_Y, BIN_Z],
            size: [BIN_W, BIN_H, BIN_D],
            colors: [
                BODY_FRONT,
                BODY_BACK,
                BODY_SIDE,
                BODY_SIDE,
                BODY_TOP,
                BODY_BOTTOM,
            ],
        },
        BoxPrimitive {
            name: "accent stripe",
            origin: [BIN_X + 12.0, BIN_Y + BIN_H - 20.0, BIN_Z - 0.5],
            size: [BIN_W - 24.0, 7.0, 1.0],
            colors: [
                ACCENT_FRONT,
                ACCENT_REST,
                ACCENT_REST,
                ACCENT_REST,
                ACCENT_REST,
                ACCENT_REST,
            ],
        },
        BoxPrimitive {
            name: "screen bezel",
            origin: [SCREEN_X - 6.0, SCREEN_Y - 6.0, BIN_Z - 3.5],
            size: [SCREEN_W + 12.0, SCREEN_H + 12.0, 5.0],
            colors: [
                BEZEL_FRONT,
                BEZEL_SIDE,
                BEZEL_SIDE,
                BEZEL_SIDE,
                BEZEL_SIDE,
                BEZEL_SIDE,
            ],
        },
        BoxPrimitive {
            name: "slot housing",
            origin: [SLOT_X - 7.0, SLOT_Y - 5.0, SLOT_Z - 6.0],
            size: [SLOT_W + 14.0, 8.0, SLOT_D + 12.0],
            colors: [
                Color::rgb8(0x1f, 0x3d, 0x24),
                Color::rgb8(0x14, 0x2a, 0x18),
                Color::rgb8(0x19, 0x2f, 0x1e),
                Color::rgb8(0x19, 0x2f, 0x1e),
                Color::rgb8(0x24, 0x4a, 0x2a),
                Color::rgb8(0x0e, 0x1f, 0x12),
            ],
        },
        BoxPrimitive {
            name: "slot opening",
            origin: [SLOT_X, SLOT_Y, SLOT_Z],
            size: [SLOT_W, SLOT_H, SLOT_D],
            colors: [
                SLOT_TOP,
                SLOT_TOP,
                SLOT_SIDE,
                SLOT_SIDE,
                Color::rgb8(0x01, 0x04, 0x02),
                SLOT_TOP,
            ],
        },
        BoxPrimitive {
            name: "lid",
            origin: [LID_X, LID_Y, LID_Z],
            size: [LID_W, LID_H, LID_D],
            colors: [LID_FRONT, LID_BACK, LID_SIDE, LID_SIDE, LID_TOP, BODY_BOTTOM],
        },
        BoxPrimitive {
            name: "lid handle",
            origin: [-18.0, LID_Y - 10.0, -10.0],
            size: [36.0, 10.0, 20.0],
            colors: [
                Color::rgb8(0x2a, 0x68, 0x32),
                Color::rgb8(0x1a, 0x44, 0x22),
                Color::rgb8(0x22, 0x57, 0x2a),
                Color::rgb8(0x22, 0x57, 0x2a),
                Color::rgb8(0x30, 0x78, 0x3a),
                Color::rgb8(0x15, 0x2d, 0x1a),
            ],
        },
    ]
}

/// Queues every face of the bin
pub fn build_scene(queue: &mut FaceQueue, camera: &CameraState, viewport: &Viewport) {
    for primitive in scene_boxes().iter() {
        let _span = trace_span!("box", name = primitive.name).entered();
        primitive.queue(queue, camera, viewport);
    }
}

/// Projected screen point the trash falls into
pub fn slot_mouth(camera: &CameraState, viewport: &Viewport) -> ScreenPoint {
    viewport.project(camera, [0.0, SLOT_Y - 4.0, SLOT_Z + SLOT_D / 2.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Op, Recorder};
    use crate::surface::Paint;

    fn viewport() -> Viewport {
        Viewport::new(460.0, 460.0).unwrap()
    }

    #[test]
    fn queues_six_faces_per_box() {
        let mut queue = FaceQueue::new();
        build_scene(&mut queue, &CameraState::default(), &viewport());
        let mut recorder = Recorder::new(460.0, 460.0);
        queue.flush(&mut recorder);
        let faces = recorder
            .ops
            .iter()
            .filter(|op| matches!(op, Op::FillPolygon(points, _) if points.len() == 4))
            .count();
        assert_eq!(faces, 8 * 6);
    }

    #[test]
    fn emission_order_is_fixed() {
        let names: Vec<_> = scene_boxes().iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            [
                "base slab",
                "body",
                "accent stripe",
                "screen bezel",
                "slot housing",
                "slot opening",
                "lid",
                "lid handle"
            ]
        );
    }

    #[test]
    fn lid_sits_on_body_and_slot_on_lid() {
        assert_eq!(LID_Y + LID_H, BIN_Y);
        assert_eq!(SLOT_Y + SLOT_H, LID_Y);
        assert!(SCREEN_Z < BIN_Z);
    }

    #[test]
    fn front_face_is_nearest_when_facing_camera() {
        let camera = {
            let mut camera = CameraState::default();
            camera.yaw = std::f64::consts::PI;
            camera
        };
        let boxes = scene_boxes();
        let body = &boxes[1];
        let mut queue = FaceQueue::new();
        body.queue(&mut queue, &camera, &viewport());
        let mut recorder = Recorder::new(460.0, 460.0);
        queue.flush(&mut recorder);
        let last_fill = recorder
            .ops
            .iter()
            .rev()
            .find_map(|op| match op {
                Op::FillPolygon(_, Paint::Solid(color)) => Some(color.clone()),
                _ => None,
            })
            .unwrap();
        // the +Z side faces the eye at half a turn of yaw
        assert_eq!(last_fill, BODY_FRONT);
    }

    #[test]
    fn slot_mouth_is_above_bin_centre() {
        let mouth = slot_mouth(&CameraState::default(), &viewport());
        let centre = viewport().project(&CameraState::default(), [0.0, 0.0, 0.0]);
        assert!(mouth.y < centre.y);
    }
}
