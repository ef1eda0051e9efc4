//! Range properties of launches and bursts over many random draws.

use glam::Vec3;
use proptest::prelude::*;
use stagefire::firework::{BURST_SPREAD, BURST_JITTER};
use stagefire::{Color, Firework, NullScene, Phase};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn burst_stays_within_jitter_and_spread(
        x in -500.0f32..500.0,
        y in 80.0f32..800.0,
        z in -1000.0f32..-200.0,
        seed in any::<u64>(),
    ) {
        let origin = Vec3::new(x, y, z);
        let mut scene = NullScene::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut fw = Firework::with_course(origin, origin, Color::WHITE, &mut scene);

        fw.explode(origin, &mut rng, &mut scene);

        prop_assert_eq!(fw.phase(), Phase::Exploded);
        prop_assert_eq!(fw.positions().len(), 80);
        prop_assert_eq!(fw.targets().len(), 80);
        prop_assert_eq!(fw.colors().len(), 80);
        for (p, t) in fw.positions().iter().zip(fw.targets()) {
            prop_assert!((*p - origin).abs().max_element() <= BURST_JITTER as f32 + 1e-3);
            prop_assert!((*t - origin).abs().max_element() <= BURST_SPREAD as f32 + 1e-3);
        }
        prop_assert_eq!(scene.live_groups(), 1);
    }

    #[test]
    fn launches_respect_the_pad(seed in any::<u64>()) {
        let mut scene = NullScene::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        let fw = Firework::launch(&mut rng, &mut scene);
        let from = fw.positions()[0];
        let to = fw.targets()[0];

        prop_assert_eq!(from.y, -800.0);
        prop_assert!((-500.0..=500.0).contains(&from.x));
        prop_assert!((-1000.0..=-200.0).contains(&from.z));
        prop_assert!((100.0..=800.0).contains(&to.y));
        prop_assert_eq!(from.x, to.x);
        prop_assert_eq!(from.z, to.z);
    }

    #[test]
    fn climb_always_closes_the_gap(seed in any::<u64>()) {
        let mut scene = NullScene::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut fw = Firework::launch(&mut rng, &mut scene);
        let apex = fw.targets()[0].y;

        let mut gap = (fw.positions()[0].y - apex).abs();
        while fw.phase() == Phase::Ascending {
            fw.update(&mut rng, &mut scene);
            if fw.phase() == Phase::Ascending {
                let now = (fw.positions()[0].y - apex).abs();
                prop_assert!(now < gap);
                gap = now;
            }
        }
        prop_assert_eq!(fw.particle_count(), 80);
    }
}
