use glam::{Mat4, Vec3};

pub const DEFAULT_EYE: Vec3 = Vec3::new(6.0, -65.0, -10.0);
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, -25.0, -700.0);
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;

// Orbit range around the target
pub const MIN_DISTANCE: f32 = 400.0;
pub const MAX_DISTANCE: f32 = 600.0;

const NEAR: f32 = 0.1;
const FAR: f32 = 2000.0;

/// A point projected onto the pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Normalised depth in [-1, 1], nearer is smaller.
    pub depth: f32,
}

/// Perspective camera orbiting a fixed target.
#[derive(Clone, Debug)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    fov_y: f32,
    view: Mat4,
}

impl Camera {
    /// Builds a camera, pulling `eye` along its line of sight so that it sits
    /// within the orbit range of `target`.
    pub fn new(eye: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let eye = if distance > f32::EPSILON {
            target + offset / distance * distance.clamp(MIN_DISTANCE, MAX_DISTANCE)
        } else {
            target + Vec3::Z * MIN_DISTANCE
        };

        Self {
            eye,
            target,
            fov_y: fov_degrees.to_radians(),
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Projects a world point onto a `width` x `height` pixel grid.
    ///
    /// Returns `None` for points behind the camera or outside the frustum.
    pub fn project(&self, point: Vec3, width: usize, height: usize) -> Option<Projected> {
        if width == 0 || height == 0 {
            return None;
        }
        let aspect = width as f32 / height as f32;
        let proj = Mat4::perspective_rh_gl(self.fov_y, aspect, NEAR, FAR);

        let clip = proj * self.view * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        Some(Projected {
            x: (ndc.x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc.y) * 0.5 * height as f32,
            depth: ndc.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_EYE, DEFAULT_TARGET, DEFAULT_FOV_DEGREES)
    }
}
