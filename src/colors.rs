use palette::Srgb;
use std::fmt;

/// The 16 colors accepted by the canvas, in server order
pub const PALETTE: [Srgb<u8>; 16] = [
    Srgb::new(0xff, 0xff, 0xff),
    Srgb::new(0xe4, 0xe4, 0xe4),
    Srgb::new(0x88, 0x88, 0x88),
    Srgb::new(0x22, 0x22, 0x22),
    Srgb::new(0xff, 0xa7, 0xd1),
    Srgb::new(0xe5, 0x00, 0x00),
    Srgb::new(0xe5, 0x95, 0x00),
    Srgb::new(0xa0, 0x6a, 0x42),
    Srgb::new(0xe5, 0xd9, 0x00),
    Srgb::new(0x94, 0xe0, 0x44),
    Srgb::new(0x02, 0xbe, 0x01),
    Srgb::new(0x00, 0xd3, 0xdd),
    Srgb::new(0x00, 0x83, 0xc7),
    Srgb::new(0x00, 0x00, 0xea),
    Srgb::new(0xcd, 0x6e, 0xea),
    Srgb::new(0x82, 0x00, 0x80),
];

/// One entry of [`PALETTE`], identified by its position in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor(u8);

impl PaletteColor {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PALETTE.len()).then(|| Self(index as u8))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..PALETTE.len()).map(|i| Self(i as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn srgb(self) -> Srgb<u8> {
        PALETTE[self.index()]
    }

    pub fn rgb(self) -> [u8; 3] {
        let (red, green, blue) = self.srgb().into_components();
        [red, green, blue]
    }

    /// `#rrggbb`, the form the placement endpoint expects
    pub fn to_hex(self) -> String {
        format!("#{:x}", self.srgb())
    }

    #[cfg(test)]
    pub fn from_hex(hex: &str) -> Option<Self> {
        use std::str::FromStr;

        let parsed = Srgb::<u8>::from_str(hex.trim()).ok()?;
        Self::all().find(|color| color.srgb() == parsed)
    }

    /// Squared Euclidean distance in RGB space
    pub fn distance_sq(self, rgb: [u8; 3]) -> u32 {
        self.rgb()
            .iter()
            .zip(rgb.iter())
            .map(|(&a, &b)| {
                let d = i32::from(a) - i32::from(b);
                (d * d) as u32
            })
            .sum()
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Nearest palette entry; on equal distance the earlier entry wins
pub fn closest_color(rgb: [u8; 3]) -> PaletteColor {
    let mut best = PaletteColor(0);
    let mut best_distance = u32::MAX;

    for color in PaletteColor::all() {
        let distance = color.distance_sq(rgb);
        if distance < best_distance {
            best = color;
            best_distance = distance;
            if distance == 0 {
                break;
            }
        }
    }

    best
}
