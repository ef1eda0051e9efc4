//! stagefire
//!
//! A concert-stage fireworks show rendered in the terminal.
//!
//! Fireworks rise from a launch pad behind the stage, burst into 80 particles
//! near their apex and fade out. Every particle group is handed to a
//! [`scene::ParticleScene`]; the terminal implementation projects the groups
//! through a perspective camera and draws them with 24-bit half-blocks, with
//! an audio-reactive spectrum plane in front of the stage and light beams
//! standing on it.

pub mod backdrop;
pub mod camera;
pub mod color;
pub mod config;
pub mod effects;
pub mod firework;
pub mod random;
pub mod scene;
pub mod show;
pub mod spectrum_plane;
pub mod stage_lights;
pub mod terminal;

pub use color::Color;
pub use config::{Args, ConfigError, ShowConfig};
pub use firework::{Firework, Phase};
pub use random::RandomSource;
pub use scene::{GroupHandle, NullScene, ParticleScene};
pub use show::{FireworkShow, ShowStats, simulate};
