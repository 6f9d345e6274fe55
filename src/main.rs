use clap::Parser;
use druid::{AppLauncher, LocalizedString, WindowDesc};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod camera;
mod config;
mod driver;
mod error;
mod graphics;
mod input;
mod math;
mod overlay;
mod scene;
mod state;
mod surface;
mod trash;
mod vertex;
mod widget;

use config::{Args, RenderConfig};
use error::AppError;
use state::AppState;
use widget::BinWidget;

/// Main function
fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = RenderConfig::try_from(Args::parse())?;
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "launching smart bin"
    );

    let main_window = WindowDesc::new(BinWidget::new(&config))
        .title(LocalizedString::new("Smart Bin 3D"))
        .window_size((f64::from(config.width), f64::from(config.height)));

    let initial_state = AppState {
        debug: config.debug,
        paused: config.paused,
    };

    AppLauncher::with_window(main_window).launch(initial_state)?;

    Ok(())
}
