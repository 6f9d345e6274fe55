//! The per-frame pipeline.

use crate::camera::Viewport;
use crate::overlay::{draw_ambient, draw_screen_overlay, draw_shadow, draw_slot_glow};
use crate::scene::{build_scene, slot_mouth};
use crate::state::RendererState;
use crate::surface::Surface;
use druid::kurbo::Point;
use tracing::{debug, info};

/// What the host scheduler should do after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Continue,
}

/// Owns the renderer state and runs one frame per tick
pub struct FrameDriver {
    viewport: Viewport,
    state: RendererState,
}

impl FrameDriver {
    /// Returns `None` when there is no surface to draw into
    pub fn start(viewport: Option<Viewport>, seed: Option<u64>) -> Option<Self> {
        let Some(viewport) = viewport else {
            info!("no drawable surface, renderer disabled");
            return None;
        };
        let size = viewport.size();
        info!(width = size.width, height = size.height, "renderer attached");
        Some(FrameDriver {
            viewport,
            state: RendererState::new(seed),
        })
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advances the simulation by one frame and paints it
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Schedule {
        self.state.frame += 1;
        self.paint_static(surface);

        let slot = slot_mouth(&self.state.camera, &self.viewport);
        self.state.trash.update(slot);
        self.state.trash.draw(surface);

        if !self.state.input.is_dragging() {
            self.state.camera.idle_spin();
        }
        Schedule::Continue
    }

    /// Paints the current state without advancing it
    pub fn redraw(&mut self, surface: &mut dyn Surface) {
        self.paint_static(surface);
        self.state.trash.draw(surface);
    }

    fn paint_static(&mut self, surface: &mut dyn Surface) {
        let state = &mut self.state;
        let viewport = &self.viewport;

        surface.clear();
        draw_ambient(surface, viewport);
        draw_shadow(surface, &state.camera, viewport);

        state.faces.reset();
        build_scene(&mut state.faces, &state.camera, viewport);
        state.faces.flush(surface);
        debug_assert!(state.faces.is_empty());

        draw_screen_overlay(
            surface,
            &state.camera,
            viewport,
            state.frame,
            state.trash.last_sorted(),
        );
        draw_slot_glow(surface, &state.camera, viewport, state.frame);
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.state.input.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Point) -> bool {
        self.state.input.pointer_move(pos, &mut self.state.camera)
    }

    pub fn pointer_up(&mut self) {
        self.state.input.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.state.input.wheel(delta_y, &mut self.state.camera);
    }

    pub fn touch_start(&mut self, touches: &[Point]) {
        self.state.input.touch_start(touches);
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        self.state.input.touch_move(touches, &mut self.state.camera)
    }

    pub fn touch_end(&mut self) {
        self.state.input.touch_end();
    }

    pub fn reset_camera(&mut self) {
        self.state.camera.reset();
        debug!("camera reset");
    }
}
