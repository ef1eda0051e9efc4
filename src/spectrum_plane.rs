//! Audio-reactive grid floating above the stage.
//!
//! Each vertex of a 64 x 64 grid is pushed out of its plane by a sine of two
//! spectrum bands picked by its distance from the centre lines, and coloured
//! by its position in the grid. The spectrum is a synthetic byte spectrum
//! (no audio is decoded), animated with Perlin noise.

use crate::color::Color;
use crate::scene::{GroupHandle, ParticleScene};
use glam::{Mat4, Quat, Vec3};
use noise::{NoiseFn, Perlin};

pub const BANDS: usize = 64;
pub const GRID_SEGMENTS: usize = 64;
pub const GRID_EXTENT: f32 = 64.0;

pub const DEFAULT_AMPLITUDE: f32 = 6.0;

const CENTER: Vec3 = Vec3::new(0.0, -200.0, -700.0);
const SCALE: f32 = 3.0;
const STRETCH_X: f32 = 2.0;

pub type Spectrum = [u8; BANDS];

/// Out-of-plane displacement of the grid vertex at `(x, y)`.
pub fn displacement(x: f32, y: f32, spectrum: &Spectrum, amplitude: f32) -> f32 {
    let bx = band_index(x.abs());
    let by = band_index(y.abs());
    (spectrum[bx] as f32 / 64.0 + spectrum[by] as f32 / 64.0).sin() * amplitude
}

/// Colour of the grid vertex at `(x, y)`.
pub fn vertex_color(x: f32, y: f32) -> Color {
    let ax = x.abs();
    let ay = y.abs();
    Color::new(
        (32.0 - ax) / 16.0,
        (16.0 - ay) / 16.0,
        ((ax + ay) / 2.0) / 16.0,
    )
    .saturate()
}

fn band_index(distance: f32) -> usize {
    ((distance + 0.5).floor() as usize).min(BANDS - 1)
}

/// Byte spectrum that drifts over time, louder in the low bands.
pub struct SyntheticSpectrum {
    perlin: Perlin,
    time: f64,
    bands: Spectrum,
}

impl SyntheticSpectrum {
    pub fn new(seed: u32) -> Self {
        let mut spectrum = Self {
            perlin: Perlin::new(seed),
            time: 0.0,
            bands: [0; BANDS],
        };
        spectrum.refresh();
        spectrum
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt as f64;
        // Keep the noise input small
        if self.time > 10000.0 {
            self.time -= 10000.0;
        }
        self.refresh();
    }

    pub fn bands(&self) -> &Spectrum {
        &self.bands
    }

    fn refresh(&mut self) {
        for (i, band) in self.bands.iter_mut().enumerate() {
            let n = self.perlin.get([i as f64 * 0.15, self.time * 1.5]) as f32;
            let level = (n * 0.5 + 0.5).clamp(0.0, 1.0);
            let falloff = 1.0 - (i as f32 / BANDS as f32) * 0.7;
            *band = (level * falloff * 255.0) as u8;
        }
    }
}

/// The displaced grid, registered with a scene as one particle group.
pub struct SpectrumPlane {
    amplitude: f32,
    spectrum: SyntheticSpectrum,
    grid: Vec<(f32, f32)>,
    transform: Mat4,
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    group: Option<GroupHandle>,
}

impl SpectrumPlane {
    pub fn new(amplitude: f32, seed: u32) -> Self {
        let step = GRID_EXTENT / GRID_SEGMENTS as f32;
        let half = GRID_EXTENT / 2.0;
        let mut grid = Vec::with_capacity((GRID_SEGMENTS + 1) * (GRID_SEGMENTS + 1));
        for row in 0..=GRID_SEGMENTS {
            for col in 0..=GRID_SEGMENTS {
                grid.push((-half + col as f32 * step, half - row as f32 * step));
            }
        }

        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(STRETCH_X * SCALE, SCALE, SCALE),
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4),
            CENTER,
        );
        let colors = grid.iter().map(|&(x, y)| vertex_color(x, y)).collect();

        let mut plane = Self {
            amplitude,
            spectrum: SyntheticSpectrum::new(seed),
            grid,
            transform,
            positions: Vec::new(),
            colors,
            group: None,
        };
        plane.rebuild();
        plane
    }

    pub fn attach<S: ParticleScene + ?Sized>(&mut self, scene: &mut S) {
        if self.group.is_none() {
            self.group = Some(scene.add_group(&self.positions, &self.colors));
        }
    }

    pub fn detach<S: ParticleScene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(group) = self.group.take() {
            scene.remove_group(group);
        }
    }

    pub fn update<S: ParticleScene + ?Sized>(&mut self, dt: f32, scene: &mut S) {
        self.spectrum.advance(dt);
        self.rebuild();
        if let Some(group) = self.group {
            scene.positions_changed(group, &self.positions);
        }
    }

    pub fn group(&self) -> Option<GroupHandle> {
        self.group
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    fn rebuild(&mut self) {
        let bands = *self.spectrum.bands();
        self.positions.clear();
        for &(x, y) in &self.grid {
            let z = displacement(x, y, &bands, self.amplitude);
            self.positions
                .push(self.transform.transform_point3(Vec3::new(x, y, z)));
        }
    }
}
