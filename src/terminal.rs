//! Terminal renderer for particle groups.
//!
//! Groups are projected through the camera into a glow buffer twice as tall
//! as the terminal, then encoded as 24-bit ANSI half-blocks: each character
//! cell carries two pixels, the top one as background colour and the bottom
//! one as the foreground of `▄`.
//!
//! Each pixel keeps the depth of the point that lit it. A nearer point
//! replaces whatever is behind it; at equal depth the brighter one wins.

use crate::camera::{Camera, Projected};
use crate::color::{Color, blend};
use crate::scene::{GroupHandle, ParticleScene};
use glam::Vec3;
use std::collections::BTreeMap;
use std::io::{self, Write};

// Intensity scale: a pixel at GLOW_FULL is drawn fully in its particle colour
const GLOW_FULL: f32 = 3.0;
const GLOW_CORE: f32 = 2.5;
const GLOW_HALO: f32 = 0.8;
const FINE_CORE: f32 = 1.2;
const VISIBLE_THRESHOLD: f32 = 0.05;

/// How the points of a group are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointStyle {
    /// Bright core with a one-pixel halo.
    #[default]
    Glow,
    /// Single dim pixel.
    Fine,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Texel {
    intensity: f32,
    color: (u8, u8, u8),
    depth: f32,
}

impl Texel {
    fn background(color: (u8, u8, u8)) -> Self {
        Self {
            intensity: 0.0,
            color,
            depth: f32::INFINITY,
        }
    }
}

struct Group {
    positions: Vec<Vec3>,
    colors: Vec<(u8, u8, u8)>,
    opacity: f32,
    style: PointStyle,
    projected: Vec<Option<Projected>>,
    dirty: bool,
}

/// `ParticleScene` that draws into the terminal.
pub struct TerminalScene {
    width: usize,
    height: usize,
    camera: Camera,
    groups: BTreeMap<GroupHandle, Group>,
    next_handle: u64,
    glow_buffer: Vec<Texel>,
    output_buf: Vec<u8>,
}

impl TerminalScene {
    /// `width` x `height` in pixels; `height` is twice the terminal rows.
    pub fn new(width: usize, height: usize, camera: Camera) -> Self {
        Self {
            width,
            height,
            camera,
            groups: BTreeMap::new(),
            next_handle: 0,
            glow_buffer: vec![Texel::background((0, 0, 0)); width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    /// Changes the canvas size and reprojects every group.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            log::warn!("terminal resized to an empty canvas ({width}x{height})");
        }
        self.width = width;
        self.height = height;
        self.glow_buffer = vec![Texel::background((0, 0, 0)); width * height];
        for group in self.groups.values_mut() {
            group.dirty = true;
        }
    }

    pub fn set_style(&mut self, handle: GroupHandle, style: PointStyle) {
        if let Some(group) = self.groups.get_mut(&handle) {
            group.style = style;
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rasterizes every group over `background` into the glow buffer.
    pub fn rasterize(&mut self, background: (u8, u8, u8)) {
        self.glow_buffer.fill(Texel::background(background));

        let (width, height) = (self.width, self.height);
        for group in self.groups.values_mut() {
            if group.dirty {
                group.projected.clear();
                group
                    .projected
                    .extend(group.positions.iter().map(|p| self.camera.project(*p, width, height)));
                group.dirty = false;
            }

            let opacity = group.opacity.clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }

            for (point, &color) in group.projected.iter().zip(&group.colors) {
                let Some(point) = point else { continue };
                let x = point.x as i32;
                let y = point.y as i32;
                let mut canvas = Canvas {
                    buffer: &mut self.glow_buffer,
                    width,
                    height,
                    depth: point.depth,
                    color,
                };
                match group.style {
                    PointStyle::Fine => canvas.plot(x, y, FINE_CORE * opacity),
                    PointStyle::Glow => {
                        for dy in -1..=1 {
                            for dx in -1..=1 {
                                if dx == 0 && dy == 0 {
                                    continue;
                                }
                                canvas.plot(x + dx, y + dy, GLOW_HALO * opacity);
                            }
                        }
                        canvas.plot(x, y, GLOW_CORE * opacity);
                    }
                }
            }
        }
    }

    /// Intensity and colour of one pixel of the last rasterized frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<(f32, (u8, u8, u8))> {
        if x < self.width && y < self.height {
            let texel = self.glow_buffer[y * self.width + x];
            Some((texel.intensity, texel.color))
        } else {
            None
        }
    }

    /// Rasterizes and writes one full frame.
    pub fn render<W: Write>(&mut self, background: (u8, u8, u8), out: &mut W) -> io::Result<()> {
        self.rasterize(background);
        self.encode(background)?;
        out.write_all(&self.output_buf)?;
        out.flush()
    }

    fn encode(&mut self, background: (u8, u8, u8)) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        // Sentinels that never match a real colour on the first cell
        let mut prev_top: Option<(u8, u8, u8)> = None;
        let mut prev_bot: Option<(u8, u8, u8)> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top = shade(self.glow_buffer[top_idx], background);
                let bot = shade(self.glow_buffer[bot_idx], background);

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }
        Ok(())
    }
}

/// Pixels lit by one projected point.
struct Canvas<'a> {
    buffer: &'a mut [Texel],
    width: usize,
    height: usize,
    depth: f32,
    color: (u8, u8, u8),
}

impl Canvas<'_> {
    fn plot(&mut self, x: i32, y: i32, intensity: f32) {
        // Too faint to show, so it must not hide anything either
        if intensity <= VISIBLE_THRESHOLD {
            return;
        }
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let texel = &mut self.buffer[y as usize * self.width + x as usize];
        let nearer = self.depth < texel.depth;
        let brighter = self.depth == texel.depth && intensity > texel.intensity;
        if nearer || brighter {
            *texel = Texel {
                intensity,
                color: self.color,
                depth: self.depth,
            };
        }
    }
}

fn shade(texel: Texel, background: (u8, u8, u8)) -> (u8, u8, u8) {
    if texel.intensity > VISIBLE_THRESHOLD {
        blend(background, texel.color, texel.intensity / GLOW_FULL)
    } else {
        background
    }
}

impl ParticleScene for TerminalScene {
    fn add_group(&mut self, positions: &[Vec3], colors: &[Color]) -> GroupHandle {
        assert_eq!(positions.len(), colors.len(), "positions and colors must be index-aligned");
        self.next_handle += 1;
        let handle = GroupHandle(self.next_handle);
        self.groups.insert(
            handle,
            Group {
                positions: positions.to_vec(),
                colors: colors.iter().map(|c| c.to_rgb8()).collect(),
                opacity: 1.0,
                style: PointStyle::default(),
                projected: Vec::with_capacity(positions.len()),
                dirty: true,
            },
        );
        handle
    }

    fn positions_changed(&mut self, handle: GroupHandle, positions: &[Vec3]) {
        if let Some(group) = self.groups.get_mut(&handle) {
            assert_eq!(positions.len(), group.colors.len(), "particle count changed in place");
            group.positions.clear();
            group.positions.extend_from_slice(positions);
            group.dirty = true;
        }
    }

    fn set_opacity(&mut self, handle: GroupHandle, opacity: f32) {
        if let Some(group) = self.groups.get_mut(&handle) {
            group.opacity = opacity;
        }
    }

    fn remove_group(&mut self, handle: GroupHandle) {
        self.groups.remove(&handle);
    }
}
