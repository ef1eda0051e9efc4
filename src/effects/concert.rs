use super::Effect;
use crate::backdrop::Backdrop;
use crate::camera::{Camera, DEFAULT_EYE, DEFAULT_TARGET};
use crate::config::ShowConfig;
use crate::show::FireworkShow;
use crate::spectrum_plane::SpectrumPlane;
use crate::stage_lights::StageLights;
use crate::terminal::{PointStyle, TerminalScene};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::io::Write;

/// Fireworks over the stage, with the spectrum plane in front of it.
pub struct ConcertEffect {
    show: FireworkShow,
    scene: TerminalScene,
    plane: Option<SpectrumPlane>,
    lights: Option<StageLights>,
    rng: fastrand::Rng,
    backdrop: Backdrop,
    time: f64,
    paused: bool,
}

impl Effect for ConcertEffect {
    fn new(width: usize, height: usize, config: &ShowConfig) -> Self {
        let camera = Camera::new(DEFAULT_EYE, DEFAULT_TARGET, config.fov_degrees);
        let mut scene = TerminalScene::new(width, height, camera);
        let mut rng = config.rng();

        let plane = config.show_plane.then(|| {
            let mut plane = SpectrumPlane::new(config.amplitude, rng.u32(..));
            plane.attach(&mut scene);
            if let Some(group) = plane.group() {
                scene.set_style(group, PointStyle::Fine);
            }
            plane
        });

        let lights = config.show_lights.then(|| {
            let mut lights = StageLights::new();
            lights.attach(&mut scene);
            if let Some(group) = lights.group() {
                scene.set_style(group, PointStyle::Fine);
            }
            lights
        });

        Self {
            show: FireworkShow::new(config.spawn_one_in),
            scene,
            plane,
            lights,
            rng,
            backdrop: config.backdrop,
            time: 0.0,
            paused: false,
        }
    }

    fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.time += f64::from(dt);

        self.show.tick(&mut self.rng, &mut self.scene);
        if let Some(plane) = &mut self.plane {
            plane.update(dt, &mut self.scene);
        }
    }

    fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let background = self.background();
        self.scene.render(background, out)
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.scene.resize(width, height);
    }

    fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('f') => self.show.launch(&mut self.rng, &mut self.scene),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.paused = !self.paused;
                log::debug!("show {}", if self.paused { "paused" } else { "resumed" });
            }
            _ => {}
        }
    }
}

impl ConcertEffect {
    pub fn show(&self) -> &FireworkShow {
        &self.show
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_lights(&self) -> bool {
        self.lights.is_some()
    }

    fn background(&self) -> (u8, u8, u8) {
        self.backdrop.color_at(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::PALETTE;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn config() -> ShowConfig {
        ShowConfig {
            seed: Some(17),
            ..ShowConfig::default()
        }
    }

    #[test]
    fn launch_key_adds_a_firework() {
        let mut effect = ConcertEffect::new(60, 40, &config());
        let before = effect.show().len();
        effect.handle_event(&key('f'));
        assert_eq!(effect.show().len(), before + 1);
    }

    #[test]
    fn pause_freezes_the_show() {
        let mut effect = ConcertEffect::new(60, 40, &config());
        effect.handle_event(&key('p'));
        assert!(effect.is_paused());
        for _ in 0..10 {
            effect.update(1.0 / 60.0);
        }
        assert_eq!(effect.show().frame(), 0);

        effect.handle_event(&key(' '));
        effect.update(1.0 / 60.0);
        assert_eq!(effect.show().frame(), 1);
    }

    #[test]
    fn renders_a_full_frame() {
        let mut effect = ConcertEffect::new(20, 10, &config());
        for _ in 0..200 {
            effect.update(1.0 / 60.0);
        }
        let mut out = Vec::new();
        effect.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('▄').count(), 20 * 5);
    }

    #[test]
    fn stage_lights_follow_the_config() {
        let effect = ConcertEffect::new(20, 10, &config());
        assert!(effect.has_lights());
        // plane and lights
        assert_eq!(effect.scene.group_count(), 2);

        let bare = ShowConfig {
            show_lights: false,
            show_plane: false,
            ..config()
        };
        let effect = ConcertEffect::new(20, 10, &bare);
        assert!(!effect.has_lights());
        assert_eq!(effect.scene.group_count(), 0);
    }

    #[test]
    fn backdrop_cycle_continues_past_ten_thousand_seconds() {
        let cycling = ShowConfig {
            backdrop: Backdrop::Cycle { speed: 1.0 },
            ..config()
        };
        let mut effect = ConcertEffect::new(20, 10, &cycling);
        effect.time = 9_999.9;
        assert_eq!(effect.background(), PALETTE[9_999 % 7]);

        effect.update(0.2);
        assert!(effect.time > 10_000.0);
        assert_eq!(effect.background(), PALETTE[10_000 % 7]);
    }

    #[test]
    fn resize_survives_empty_canvas() {
        let mut effect = ConcertEffect::new(20, 10, &config());
        effect.resize(0, 0);
        effect.update(1.0 / 60.0);
        let mut out = Vec::new();
        effect.render(&mut out).unwrap();
        effect.resize(30, 12);
        effect.render(&mut out).unwrap();
    }
}
