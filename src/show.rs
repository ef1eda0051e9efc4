use crate::firework::{Firework, Phase};
use crate::random::RandomSource;
use crate::scene::{NullScene, ParticleScene};

/// Running totals over the lifetime of a show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowStats {
    pub launched: u64,
    pub exploded: u64,
    pub retired: u64,
}

/// Owns the active fireworks and drives them frame by frame.
pub struct FireworkShow {
    active: Vec<Firework>,
    spawn_one_in: u32,
    frame: u64,
    stats: ShowStats,
}

impl FireworkShow {
    /// `spawn_one_in` is the denominator of the per-frame launch chance.
    pub fn new(spawn_one_in: u32) -> Self {
        assert!(spawn_one_in > 0, "spawn chance denominator must be positive");
        Self {
            active: Vec::new(),
            spawn_one_in,
            frame: 0,
            stats: ShowStats::default(),
        }
    }

    /// Runs one frame: spawn check, then update-and-reap.
    ///
    /// A firework launched this frame joins the active set after the update
    /// pass, so it first moves on the following frame.
    pub fn tick<R, S>(&mut self, rng: &mut R, scene: &mut S)
    where
        R: RandomSource + ?Sized,
        S: ParticleScene + ?Sized,
    {
        self.frame += 1;

        let spawned = if rng.int_in(1, self.spawn_one_in as i32) == 1 {
            Some(Firework::launch(rng, scene))
        } else {
            None
        };

        let stats = &mut self.stats;
        self.active.retain_mut(|firework| {
            let was_ascending = firework.phase() == Phase::Ascending;
            firework.update(rng, scene);

            if was_ascending && firework.phase() == Phase::Exploded {
                stats.exploded += 1;
            }
            if firework.is_done() {
                stats.retired += 1;
                log::debug!("firework retired");
                false
            } else {
                true
            }
        });

        if let Some(firework) = spawned {
            self.admit(firework);
        }
    }

    /// Launches a firework immediately, outside the spawn roll.
    pub fn launch<R, S>(&mut self, rng: &mut R, scene: &mut S)
    where
        R: RandomSource + ?Sized,
        S: ParticleScene + ?Sized,
    {
        let firework = Firework::launch(rng, scene);
        self.admit(firework);
    }

    /// Adds an already constructed firework to the active set.
    pub fn admit(&mut self, firework: Firework) {
        if let Some(shell) = firework.positions().first() {
            log::debug!(
                "firework launched from ({:.0}, {:.0}, {:.0})",
                shell.x,
                shell.y,
                shell.z
            );
        }
        self.stats.launched += 1;
        self.active.push(firework);
    }

    pub fn active(&self) -> &[Firework] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> ShowStats {
        self.stats
    }
}

/// Runs a show for `frames` frames against a scene that draws nothing.
pub fn simulate<R>(spawn_one_in: u32, frames: u64, rng: &mut R) -> ShowStats
where
    R: RandomSource + ?Sized,
{
    let mut show = FireworkShow::new(spawn_one_in);
    let mut scene = NullScene::new();
    let mut peak = 0;
    for _ in 0..frames {
        show.tick(rng, &mut scene);
        peak = peak.max(show.len());
    }

    let stats = show.stats();
    log::info!(
        "{} frames: {} launched, {} exploded, {} retired, {} still active (peak {})",
        frames,
        stats.launched,
        stats.exploded,
        stats.retired,
        show.len(),
        peak
    );
    stats
}
