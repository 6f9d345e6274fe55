use crate::camera::Viewport;
use crate::config::RenderConfig;
use crate::driver::FrameDriver;
use crate::state::AppState;
use crate::surface::PietSurface;
use druid::text::FontFamily;
use druid::widget::prelude::*;
use druid::{
    commands,
    piet::{Text, TextLayout, TextLayoutBuilder},
    Color, Data, RenderContext, TimerToken, Widget,
};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Roughly one tick per display refresh
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Smart bin widget
pub struct BinWidget {
    seed: Option<u64>,
    driver: Option<FrameDriver>,
    timer: TimerToken,
    /// Set by the timer, consumed by the next paint
    tick_due: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl BinWidget {
    pub fn new(config: &RenderConfig) -> Self {
        BinWidget {
            seed: config.seed,
            driver: None,
            timer: TimerToken::INVALID,
            tick_due: false,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    fn attach(&mut self, size: Size) {
        let viewport = Viewport::new(size.width, size.height);
        if let Some(driver) = self.driver.as_mut() {
            if let Some(viewport) = viewport {
                driver.resize(viewport);
            }
            return;
        }
        self.driver = FrameDriver::start(viewport, self.seed);
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    fn draw_label(ctx: &mut PaintCtx, text: String, size: f64, pos: (f64, f64)) {
        let layout = ctx
            .text()
            .new_text_layout(text)
            .font(FontFamily::SYSTEM_UI, size)
            .text_color(Color::WHITE)
            .build();
        match layout {
            Ok(layout) => ctx.draw_text(&layout, pos),
            Err(err) => warn!(%err, "could not lay out label"),
        }
    }

    fn draw_debug(&self, ctx: &mut PaintCtx, driver: &FrameDriver) {
        let state = driver.state();
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!(
                "Yaw: {:.2}, Pitch: {:.2}, Zoom: {:.2}",
                state.camera.yaw,
                state.camera.pitch(),
                state.camera.zoom()
            ),
            format!("Frame: {}", state.frame),
            format!("Trash: {}", state.trash.items().len()),
            format!("FPS: {:.2}", self.fps),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            Self::draw_label(ctx, line, 12.0, (10.0, 10.0 + i as f64 * 20.0));
        }
    }

    fn draw_paused(ctx: &mut PaintCtx, size: Size) {
        ctx.fill(size.to_rect(), &Color::rgba8(0, 0, 0, 150));
        let layout = ctx
            .text()
            .new_text_layout("Paused")
            .font(FontFamily::SYSTEM_UI, 36.0)
            .default_attribute(druid::piet::FontWeight::BOLD)
            .text_color(Color::WHITE)
            .build();
        match layout {
            Ok(layout) => {
                let text_size = layout.size();
                let pos = (
                    (size.width - text_size.width) / 2.0,
                    (size.height - text_size.height) / 2.0,
                );
                ctx.draw_text(&layout, pos);
            }
            Err(err) => warn!(%err, "could not lay out pause banner"),
        }
    }
}

impl Widget<AppState> for BinWidget {
    /// Handle events for the bin widget
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                self.timer = ctx.request_timer(FRAME_INTERVAL);
                // Request focus to receive keyboard events
                ctx.request_focus();
            }
            Event::Timer(token) if *token == self.timer => {
                if !data.paused {
                    self.tick_due = true;
                    ctx.request_paint();
                }
                self.timer = ctx.request_timer(FRAME_INTERVAL);
            }
            Event::KeyDown(key_event) => {
                if let druid::keyboard_types::Key::Character(s) = &key_event.key {
                    match s.as_str() {
                        "d" | "D" => {
                            data.debug = !data.debug;
                            ctx.request_paint();
                        }
                        "p" | "P" => {
                            data.paused = !data.paused;
                            debug!(paused = data.paused, "pause toggled");
                            if let Some(driver) = self.driver.as_mut() {
                                driver.pointer_up();
                            }
                            ctx.set_active(false);
                            ctx.request_paint();
                        }
                        "q" | "Q" => {
                            ctx.submit_command(commands::QUIT_APP);
                        }
                        "r" | "R" => {
                            if let Some(driver) = self.driver.as_mut() {
                                driver.reset_camera();
                                ctx.request_paint();
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::MouseDown(mouse_event) => {
                if let (false, Some(driver)) = (data.paused, self.driver.as_mut()) {
                    driver.pointer_down(mouse_event.pos);
                    // Keep receiving moves outside the canvas while dragging
                    ctx.set_active(true);
                }
            }
            Event::MouseMove(mouse_event) => {
                if let (false, Some(driver)) = (data.paused, self.driver.as_mut()) {
                    if driver.pointer_move(mouse_event.pos) {
                        ctx.request_paint();
                    }
                }
            }
            Event::MouseUp(_) => {
                if let Some(driver) = self.driver.as_mut() {
                    driver.pointer_up();
                }
                ctx.set_active(false);
            }
            Event::Wheel(wheel_event) => {
                if let (false, Some(driver)) = (data.paused, self.driver.as_mut()) {
                    driver.wheel(wheel_event.wheel_delta.y);
                    ctx.set_handled();
                    ctx.request_paint();
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
        if let LifeCycle::Size(size) = event {
            self.attach(*size);
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &AppState, data: &AppState, _env: &Env) {
        if !old_data.same(data) {
            ctx.request_paint();
        }
    }

    /// Determines the layout constraints for the bin widget
    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    /// Paint the bin widget
    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        let size = ctx.size();
        let Some(mut driver) = self.driver.take() else {
            return;
        };

        {
            let mut surface = PietSurface::new(&mut *ctx.render_ctx, size);
            if std::mem::take(&mut self.tick_due) {
                driver.tick(&mut surface);
                self.update_fps();
            } else {
                driver.redraw(&mut surface);
            }
        }

        if data.debug {
            self.draw_debug(ctx, &driver);
        }
        if data.paused {
            Self::draw_paused(ctx, size);
        }
        self.driver = Some(driver);
    }
}
