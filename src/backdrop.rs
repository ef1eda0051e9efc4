// Concert lighting palette
pub const PALETTE: [(u8, u8, u8); 7] = [
    (0x4d, 0x4d, 0xff),
    (0xc7, 0x24, 0xb1),
    (0xe0, 0xe7, 0x22),
    (0xff, 0xad, 0x00),
    (0xd2, 0x27, 0x30),
    (0xdb, 0x3e, 0xb1),
    (0x44, 0xd6, 0x2c),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    Solid((u8, u8, u8)),
    /// Steps through the palette `speed` entries per second.
    Cycle { speed: f32 },
}

impl Backdrop {
    pub fn color_at(&self, seconds: f64) -> (u8, u8, u8) {
        match *self {
            Backdrop::Solid(color) => color,
            Backdrop::Cycle { speed } => {
                let step = (f64::from(speed) * seconds).floor() as i64;
                PALETTE[step.rem_euclid(PALETTE.len() as i64) as usize]
            }
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::Solid((0, 0, 0))
    }
}
