use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use stagefire::effects::Effect;
use stagefire::effects::concert::ConcertEffect;
use stagefire::{Args, ShowConfig};
use std::io::{BufWriter, Stdout, stdout};
use std::time::{Duration, Instant};

const FIXED_DT: f32 = 1.0 / 60.0;

fn run_effect<E: Effect>(config: &ShowConfig) -> anyhow::Result<()> {
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;

    let result = execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)
        .context("failed to set up terminal")
        .and_then(|_| frame_loop::<E>(config, &mut stdout));

    // Restore the terminal even when setup or the loop failed
    let restored = execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture)
        .and_then(|_| terminal::disable_raw_mode());

    result?;
    restored.context("failed to restore terminal")?;
    Ok(())
}

fn frame_loop<E: Effect>(config: &ShowConfig, stdout: &mut BufWriter<Stdout>) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let mut effect = E::new(cols as usize, rows as usize * 2, config);

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    // Pass non-exit key events to the effect
                    effect.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    effect.resize(*cols as usize, *rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {
                    effect.handle_event(&event);
                }
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        // One show frame per fixed step: the fireworks are tuned per frame
        while accumulator >= FIXED_DT {
            effect.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        effect.render(stdout)?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = ShowConfig::try_from(&args)?;
    log::info!(
        "spawn chance 1/{}, fov {}°, backdrop {:?}, plane {}, lights {}",
        config.spawn_one_in,
        config.fov_degrees,
        config.backdrop,
        if config.show_plane { "on" } else { "off" },
        if config.show_lights { "on" } else { "off" }
    );

    if let Some(frames) = config.headless_frames {
        let mut rng = config.rng();
        let stats = stagefire::simulate(config.spawn_one_in, frames, &mut rng);
        println!(
            "launched {} exploded {} retired {}",
            stats.launched, stats.exploded, stats.retired
        );
        return Ok(());
    }

    run_effect::<ConcertEffect>(&config)
}
