//! Light beams standing on the stage.
//!
//! Six upright cones, point-sampled on their surface, registered as one
//! translucent white group.

use crate::color::Color;
use crate::scene::{GroupHandle, ParticleScene};
use glam::Vec3;

pub const CONE_BASES: [Vec3; 6] = [
    Vec3::new(-295.0, -70.0, -710.0),
    Vec3::new(-178.0, -70.0, -710.0),
    Vec3::new(-61.0, -70.0, -710.0),
    Vec3::new(56.0, -70.0, -710.0),
    Vec3::new(173.0, -70.0, -710.0),
    Vec3::new(292.0, -70.0, -710.0),
];
pub const CONE_RADIUS: f32 = 20.0;
pub const CONE_HEIGHT: f32 = 380.0;
pub const LIGHT_OPACITY: f32 = 0.5;

const RINGS: usize = 24;
const SEGMENTS: usize = 12;

/// Points on the surface of a cone centred on `center`, apex up.
///
/// Rings run from the base (radius [`CONE_RADIUS`]) towards the apex; the apex
/// itself is the last point.
pub fn cone_points(center: Vec3) -> Vec<Vec3> {
    let half = CONE_HEIGHT / 2.0;
    let mut points = Vec::with_capacity(RINGS * SEGMENTS + 1);
    for ring in 0..RINGS {
        let t = ring as f32 / RINGS as f32;
        let radius = CONE_RADIUS * (1.0 - t);
        let y = -half + t * CONE_HEIGHT;
        for segment in 0..SEGMENTS {
            let angle = segment as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
            points.push(center + Vec3::new(radius * angle.cos(), y, radius * angle.sin()));
        }
    }
    points.push(center + Vec3::Y * half);
    points
}

pub struct StageLights {
    positions: Vec<Vec3>,
    group: Option<GroupHandle>,
}

impl StageLights {
    pub fn new() -> Self {
        Self {
            positions: CONE_BASES.iter().flat_map(|&c| cone_points(c)).collect(),
            group: None,
        }
    }

    /// Registers the beams with `scene` at [`LIGHT_OPACITY`].
    pub fn attach<S: ParticleScene + ?Sized>(&mut self, scene: &mut S) {
        if self.group.is_some() {
            return;
        }
        let colors = vec![Color::WHITE; self.positions.len()];
        let group = scene.add_group(&self.positions, &colors);
        scene.set_opacity(group, LIGHT_OPACITY);
        self.group = Some(group);
    }

    pub fn detach<S: ParticleScene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(group) = self.group.take() {
            scene.remove_group(group);
        }
    }

    pub fn group(&self) -> Option<GroupHandle> {
        self.group
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl Default for StageLights {
    fn default() -> Self {
        Self::new()
    }
}
