//! Command-line arguments and the validated show configuration.

use crate::backdrop::Backdrop;
use crate::camera::DEFAULT_FOV_DEGREES;
use crate::color::parse_hex_color;
use crate::spectrum_plane::DEFAULT_AMPLITUDE;
use clap::Parser;
use thiserror::Error;

pub const DEFAULT_SPAWN_ONE_IN: u32 = 20;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "stagefire")]
#[command(about = "Concert-stage fireworks show for the terminal", long_about = None)]
#[command(after_help = "Keys: q/Esc/Ctrl+C quit, f launch, p or space pause")]
pub struct Args {
    /// Background color as hex (e.g. --bg-color 1a1b26)
    #[arg(long, value_name = "RRGGBB")]
    pub bg_color: Option<String>,

    /// Cycle the background through the concert palette (entries per second)
    #[arg(long, value_name = "SPEED", allow_negative_numbers = true, conflicts_with = "bg_color")]
    pub cycle_backdrop: Option<f32>,

    /// Launch chance per frame is one in N
    #[arg(long, value_name = "N")]
    pub spawn_one_in: Option<u32>,

    /// Seed for the random source
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Vertical field of view in degrees
    #[arg(long, value_name = "DEGREES")]
    pub fov: Option<f32>,

    /// Height of the spectrum plane ripples
    #[arg(long, value_name = "A", allow_negative_numbers = true)]
    pub amplitude: Option<f32>,

    /// Hide the spectrum plane
    #[arg(long)]
    pub no_plane: bool,

    /// Hide the stage light beams
    #[arg(long)]
    pub no_lights: bool,

    /// Simulate this many frames without a terminal and log a summary
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid hex color '{0}', expected RRGGBB (e.g. 1a1b26)")]
    InvalidColor(String),
    #[error("spawn chance denominator must be between 1 and {max}, got {got}", max = i32::MAX)]
    SpawnChance { got: u32 },
    #[error("field of view must be between 0 and 180 degrees, got {0}")]
    FieldOfView(f32),
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
}

/// Validated settings for a show.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowConfig {
    pub backdrop: Backdrop,
    pub spawn_one_in: u32,
    pub seed: Option<u64>,
    pub fov_degrees: f32,
    pub amplitude: f32,
    pub show_plane: bool,
    pub show_lights: bool,
    pub headless_frames: Option<u64>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            backdrop: Backdrop::default(),
            spawn_one_in: DEFAULT_SPAWN_ONE_IN,
            seed: None,
            fov_degrees: DEFAULT_FOV_DEGREES,
            amplitude: DEFAULT_AMPLITUDE,
            show_plane: true,
            show_lights: true,
            headless_frames: None,
        }
    }
}

impl TryFrom<&Args> for ShowConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let defaults = ShowConfig::default();

        let backdrop = match (&args.bg_color, args.cycle_backdrop) {
            (Some(hex), _) => Backdrop::Solid(
                parse_hex_color(hex).ok_or_else(|| ConfigError::InvalidColor(hex.clone()))?,
            ),
            (None, Some(speed)) => Backdrop::Cycle {
                speed: finite("cycle-backdrop", speed)?,
            },
            (None, None) => defaults.backdrop,
        };

        let spawn_one_in = args.spawn_one_in.unwrap_or(defaults.spawn_one_in);
        if spawn_one_in == 0 || spawn_one_in > i32::MAX as u32 {
            return Err(ConfigError::SpawnChance { got: spawn_one_in });
        }

        let fov_degrees = args.fov.unwrap_or(defaults.fov_degrees);
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(fov_degrees));
        }

        let amplitude = finite("amplitude", args.amplitude.unwrap_or(defaults.amplitude))?;

        Ok(Self {
            backdrop,
            spawn_one_in,
            seed: args.seed,
            fov_degrees,
            amplitude,
            show_plane: !args.no_plane,
            show_lights: !args.no_lights,
            headless_frames: args.headless,
        })
    }
}

impl ShowConfig {
    /// Random source for this show, seeded when a seed was given.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

fn finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}
