//! End-to-end lifecycle of a single firework and of a running show.

use glam::Vec3;
use stagefire::firework::{BURST_PARTICLES, FADE_STEP};
use stagefire::{Color, Firework, FireworkShow, NullScene, Phase, simulate};

const APEX: f32 = 500.0;

fn scripted() -> (Firework, NullScene) {
    let mut scene = NullScene::new();
    let fw = Firework::with_course(
        Vec3::new(0.0, -800.0, -500.0),
        Vec3::new(0.0, APEX, -500.0),
        Color::from_hsl(0.5, 1.0, 0.9),
        &mut scene,
    );
    (fw, scene)
}

#[test]
fn test_shell_climbs_then_bursts_on_crossing_frame() {
    let (mut fw, mut scene) = scripted();
    let mut rng = fastrand::Rng::with_seed(1);

    let mut y = fw.positions()[0].y;
    let mut frames = 0;
    loop {
        let next = y + (APEX - y) / 20.0;
        fw.update(&mut rng, &mut scene);
        frames += 1;

        if next.ceil() > APEX - 20.0 {
            assert_eq!(fw.phase(), Phase::Exploded);
            assert_eq!(fw.particle_count(), BURST_PARTICLES);
            for p in fw.positions() {
                assert!((p.y - next).abs() <= 10.0 + 1e-3);
                assert!(p.x.abs() <= 10.0 && (p.z + 500.0).abs() <= 10.0);
            }
            break;
        }

        assert_eq!(fw.phase(), Phase::Ascending);
        assert_eq!(fw.particle_count(), 1);
        let now = fw.positions()[0].y;
        assert_eq!(now, next);
        assert!((now - APEX).abs() < (y - APEX).abs());
        y = now;
        assert!(frames < 200);
    }
    // 1300 * 0.95^n < 20 first holds at n = 82
    assert_eq!(frames, 82);
}

#[test]
fn test_burst_fades_out_in_sixty_seven_frames() {
    let (mut fw, mut scene) = scripted();
    let mut rng = fastrand::Rng::with_seed(2);
    while fw.phase() == Phase::Ascending {
        fw.update(&mut rng, &mut scene);
    }
    assert_eq!(fw.opacity(), 1.0);

    let expected = (1.0 / FADE_STEP).ceil() as usize;
    assert_eq!(expected, 67);

    let mut frames = 0;
    while !fw.is_done() {
        assert_eq!(fw.particle_count(), BURST_PARTICLES);
        fw.update(&mut rng, &mut scene);
        frames += 1;
    }
    assert_eq!(frames, expected);
    assert!(fw.positions().is_empty() && fw.targets().is_empty() && fw.colors().is_empty());
    assert_eq!(scene.live_groups(), 0);
}

#[test]
fn test_show_reaches_steady_state() {
    let mut show = FireworkShow::new(20);
    let mut scene = NullScene::new();
    let mut rng = fastrand::Rng::with_seed(77);

    for _ in 0..10_000 {
        show.tick(&mut rng, &mut scene);
    }

    // ~150 frames per firework at a 1/20 launch chance keeps roughly 7 alive
    assert!(show.len() < 40, "active set grew to {}", show.len());
    let stats = show.stats();
    assert!(stats.launched > 300);
    assert_eq!(stats.launched - stats.retired, show.len() as u64);
}

#[test]
fn test_simulate_matches_a_manual_run() {
    let stats = simulate(20, 3_000, &mut fastrand::Rng::with_seed(8));

    let mut show = FireworkShow::new(20);
    let mut scene = NullScene::new();
    let mut rng = fastrand::Rng::with_seed(8);
    for _ in 0..3_000 {
        show.tick(&mut rng, &mut scene);
    }
    assert_eq!(stats, show.stats());
}
