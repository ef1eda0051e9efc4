use crate::color::Color;
use crate::random::RandomSource;
use crate::scene::{GroupHandle, ParticleScene};
use glam::Vec3;

// Launch pad: shells rise from a fixed altitude somewhere behind the stage
pub const LAUNCH_ALTITUDE: f32 = -800.0;
pub const LAUNCH_X: (i32, i32) = (-500, 500);
pub const LAUNCH_Z: (i32, i32) = (-200, -1000);
pub const DESTINATION_ALTITUDE: (i32, i32) = (100, 800);

pub const HUE_RANGE: (f32, f32) = (0.1, 0.9);
pub const SHELL_LIGHTNESS: f32 = 0.9;
pub const BURST_LIGHTNESS: f32 = 0.5;

pub const BURST_PARTICLES: usize = 80;
pub const BURST_JITTER: i32 = 10;
pub const BURST_SPREAD: i32 = 100;

// Each update closes 1/20 of the remaining distance (fixed step, no dt)
pub const LERP_DIVISOR: f32 = 20.0;
// Explode once the shell is within this many units of its apex
pub const EXPLODE_MARGIN: f32 = 20.0;
pub const FADE_STEP: f32 = 0.015;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ascending,
    Exploded,
}

/// One particle group moving through ascend, explode and fade.
#[derive(Debug)]
pub struct Firework {
    positions: Vec<Vec3>,
    targets: Vec<Vec3>,
    colors: Vec<Color>,
    opacity: f32,
    phase: Phase,
    done: bool,
    group: Option<GroupHandle>,
}

impl Firework {
    /// Launches a shell from a random point on the pad toward a random apex
    /// straight above it.
    pub fn launch<R, S>(rng: &mut R, scene: &mut S) -> Self
    where
        R: RandomSource + ?Sized,
        S: ParticleScene + ?Sized,
    {
        let x = rng.int_in(LAUNCH_X.0, LAUNCH_X.1) as f32;
        let apex = rng.int_in(DESTINATION_ALTITUDE.0, DESTINATION_ALTITUDE.1) as f32;
        let z = rng.int_in(LAUNCH_Z.0, LAUNCH_Z.1) as f32;

        let hue = rng.float_in(HUE_RANGE.0, HUE_RANGE.1);
        let color = Color::from_hsl(hue, 1.0, SHELL_LIGHTNESS);

        Self::with_course(
            Vec3::new(x, LAUNCH_ALTITUDE, z),
            Vec3::new(x, apex, z),
            color,
            scene,
        )
    }

    /// Launches a shell along an explicit course.
    pub fn with_course<S>(origin: Vec3, destination: Vec3, color: Color, scene: &mut S) -> Self
    where
        S: ParticleScene + ?Sized,
    {
        let positions = vec![origin];
        let colors = vec![color];
        let group = scene.add_group(&positions, &colors);

        Self {
            positions,
            targets: vec![destination],
            colors,
            opacity: 1.0,
            phase: Phase::Ascending,
            done: false,
            group: Some(group),
        }
    }

    /// Replaces the shell with a burst of particles around `origin`.
    pub fn explode<R, S>(&mut self, origin: Vec3, rng: &mut R, scene: &mut S)
    where
        R: RandomSource + ?Sized,
        S: ParticleScene + ?Sized,
    {
        if let Some(group) = self.group.take() {
            scene.remove_group(group);
        }

        self.positions.clear();
        self.targets.clear();
        self.colors.clear();

        for _ in 0..BURST_PARTICLES {
            let hue = rng.float_in(HUE_RANGE.0, HUE_RANGE.1);
            self.colors.push(Color::from_hsl(hue, 1.0, BURST_LIGHTNESS));
            self.positions.push(origin + offset(rng, BURST_JITTER));
            self.targets.push(origin + offset(rng, BURST_SPREAD));
        }
        self.phase = Phase::Exploded;

        let group = scene.add_group(&self.positions, &self.colors);
        scene.set_opacity(group, self.opacity);
        self.group = Some(group);

        log::debug!(
            "firework burst at ({:.0}, {:.0}, {:.0})",
            origin.x,
            origin.y,
            origin.z
        );
        self.check_shape();
    }

    /// Advances the firework by one frame.
    pub fn update<R, S>(&mut self, rng: &mut R, scene: &mut S)
    where
        R: RandomSource + ?Sized,
        S: ParticleScene + ?Sized,
    {
        if self.done {
            return;
        }
        self.check_shape();

        for (position, target) in self.positions.iter_mut().zip(&self.targets) {
            *position += (*target - *position) / LERP_DIVISOR;
        }
        if let Some(group) = self.group {
            scene.positions_changed(group, &self.positions);
        }

        if self.phase == Phase::Ascending {
            let shell = self.positions[0];
            if shell.y.ceil() > self.targets[0].y - EXPLODE_MARGIN {
                self.explode(shell, rng, scene);
                return;
            }
        }

        if self.phase == Phase::Exploded {
            self.opacity -= FADE_STEP;
            if let Some(group) = self.group {
                scene.set_opacity(group, self.opacity.max(0.0));
            }
        }

        if self.opacity <= 0.0 {
            self.reset(scene);
            self.done = true;
        }
    }

    fn reset<S>(&mut self, scene: &mut S)
    where
        S: ParticleScene + ?Sized,
    {
        if let Some(group) = self.group.take() {
            scene.remove_group(group);
        }
        self.positions.clear();
        self.targets.clear();
        self.colors.clear();
    }

    fn check_shape(&self) {
        assert!(
            self.positions.len() == self.targets.len() && self.targets.len() == self.colors.len(),
            "particle arrays out of step: {} positions, {} targets, {} colors",
            self.positions.len(),
            self.targets.len(),
            self.colors.len()
        );
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }
}

fn offset<R: RandomSource + ?Sized>(rng: &mut R, reach: i32) -> Vec3 {
    Vec3::new(
        rng.int_in(-reach, reach) as f32,
        rng.int_in(-reach, reach) as f32,
        rng.int_in(-reach, reach) as f32,
    )
}
