/// Linear RGB colour with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from hue, saturation and lightness.
    ///
    /// Hue wraps around the unit interval; saturation and lightness are
    /// clamped to [0, 1].
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self::new(
            hue_to_channel(q, p, h + 1.0 / 3.0),
            hue_to_channel(q, p, h),
            hue_to_channel(q, p, h - 1.0 / 3.0),
        )
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// Component-wise clamp into [0, 1].
    pub fn saturate(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Blend `fg` over `bg` with the given weight in [0, 1].
pub fn blend(bg: (u8, u8, u8), fg: (u8, u8, u8), weight: f32) -> (u8, u8, u8) {
    let w = weight.clamp(0.0, 1.0);
    (
        (bg.0 as f32 * (1.0 - w) + fg.0 as f32 * w) as u8,
        (bg.1 as f32 * (1.0 - w) + fg.1 as f32 * w) as u8,
        (bg.2 as f32 * (1.0 - w) + fg.2 as f32 * w) as u8,
    )
}

/// Parses `RRGGBB` (optionally prefixed with `#`).
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn primary_hues() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::new(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::new(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(Color::from_hsl(1.25, 1.0, 0.5), Color::from_hsl(0.25, 1.0, 0.5)));
        assert!(close(Color::from_hsl(-0.75, 1.0, 0.5), Color::from_hsl(0.25, 1.0, 0.5)));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(Color::from_hsl(0.4, 0.0, 0.3), Color::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn shell_lightness_is_pastel() {
        // l = 0.9 keeps every channel at or above 0.8
        for i in 0..=8 {
            let c = Color::from_hsl(0.1 + i as f32 * 0.1, 1.0, 0.9);
            assert!(c.r >= 0.8 - 1e-5 && c.g >= 0.8 - 1e-5 && c.b >= 0.8 - 1e-5);
        }
    }

    #[test]
    fn rgb8_round_trip_of_extremes() {
        assert_eq!(Color::WHITE.to_rgb8(), (255, 255, 255));
        assert_eq!(Color::BLACK.to_rgb8(), (0, 0, 0));
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_rgb8(), (255, 0, 128));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("1a1b26"), Some((0x1a, 0x1b, 0x26)));
        assert_eq!(parse_hex_color("#44d62c"), Some((0x44, 0xd6, 0x2c)));
        assert_eq!(parse_hex_color("12345"), None);
        assert_eq!(parse_hex_color("zz0000"), None);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.0), (0, 0, 0));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 1.0), (200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 5.0), (200, 100, 50));
    }
}
