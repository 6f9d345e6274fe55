use crate::error::ConfigError;
use clap::Parser;

const MIN_DIMENSION: u32 = 120;
const MAX_DIMENSION: u32 = 4096;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about = "Animated 3D smart trash bin")]
pub struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 460)]
    pub width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 460)]
    pub height: u32,
    /// Seed for the trash spawner; omit for a random sequence
    #[arg(long)]
    pub seed: Option<u64>,
    /// Start with the debug HUD visible
    #[arg(long)]
    pub debug: bool,
    /// Start paused
    #[arg(long)]
    pub paused: bool,
}

/// Validated render settings
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub debug: bool,
    pub paused: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 460,
            height: 460,
            seed: None,
            debug: false,
            paused: false,
        }
    }
}

impl TryFrom<Args> for RenderConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(RenderConfig {
            width: check_dimension("width", args.width)?,
            height: check_dimension("height", args.height)?,
            seed: args.seed,
            debug: args.debug,
            paused: args.paused,
        })
    }
}

fn check_dimension(name: &'static str, value: u32) -> Result<u32, ConfigError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Dimension {
            name,
            value,
            min: MIN_DIMENSION,
            max: MAX_DIMENSION,
        })
    }
}
