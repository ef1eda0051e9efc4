use crate::color::Color;
use glam::Vec3;

/// Opaque handle to a particle group registered with a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupHandle(pub(crate) u64);

/// Rendering collaborator for particle groups.
///
/// A group is a batch of points sharing one opacity. Positions and colours
/// are index-aligned. Owners call [`ParticleScene::positions_changed`] after
/// every position mutation so the renderer can pick up the new layout.
pub trait ParticleScene {
    fn add_group(&mut self, positions: &[Vec3], colors: &[Color]) -> GroupHandle;

    fn positions_changed(&mut self, handle: GroupHandle, positions: &[Vec3]);

    fn set_opacity(&mut self, handle: GroupHandle, opacity: f32);

    fn remove_group(&mut self, handle: GroupHandle);
}

/// Scene that hands out handles and discards everything else.
#[derive(Debug, Default)]
pub struct NullScene {
    next: u64,
    live: usize,
}

impl NullScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups added and not yet removed.
    pub fn live_groups(&self) -> usize {
        self.live
    }
}

impl ParticleScene for NullScene {
    fn add_group(&mut self, _positions: &[Vec3], _colors: &[Color]) -> GroupHandle {
        self.next += 1;
        self.live += 1;
        GroupHandle(self.next)
    }

    fn positions_changed(&mut self, _handle: GroupHandle, _positions: &[Vec3]) {}

    fn set_opacity(&mut self, _handle: GroupHandle, _opacity: f32) {}

    fn remove_group(&mut self, _handle: GroupHandle) {
        self.live = self.live.saturating_sub(1);
    }
}
