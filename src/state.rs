use crate::camera::CameraState;
use crate::graphics::FaceQueue;
use crate::input::InputController;
use crate::trash::TrashSystem;
use druid::Data;

/// Application state
#[derive(Clone, Data)]
pub struct AppState {
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
}

/// Everything the renderer mutates between frames
pub struct RendererState {
    pub camera: CameraState,
    pub input: InputController,
    /// Reset and flushed once per frame
    pub faces: FaceQueue,
    pub trash: TrashSystem,
    /// Ticks since start; drives the pulse animations
    pub frame: u64,
}

impl RendererState {
    pub fn new(seed: Option<u64>) -> Self {
        RendererState {
            camera: CameraState::default(),
            input: InputController::new(),
            faces: FaceQueue::new(),
            trash: TrashSystem::new(seed),
            frame: 0,
        }
    }
}
