//! Firework colour palette

use rand::Rng;

/// An opaque colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same colour at the given opacity
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// `#rrggbb` form
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A colour with opacity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// CSS `rgba(...)` string for canvas fill styles
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Fixed palette shared by fireworks and their particles.
/// Deep pink appears twice, which doubles its odds.
pub const PALETTE: [Rgb; 15] = [
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x00, 0xFF, 0x00),
    Rgb::new(0x00, 0x00, 0xFF),
    Rgb::new(0xFF, 0xFF, 0x00),
    Rgb::new(0xFF, 0x00, 0xFF),
    Rgb::new(0x00, 0xFF, 0xFF),
    Rgb::new(0xFF, 0xA5, 0x00),
    Rgb::new(0xFF, 0x14, 0x93),
    Rgb::new(0x7F, 0xFF, 0x00),
    Rgb::new(0xFF, 0x69, 0xB4),
    Rgb::new(0xFF, 0xD7, 0x00),
    Rgb::new(0xFF, 0x45, 0x00),
    Rgb::new(0x94, 0x00, 0xD3),
    Rgb::new(0x00, 0xFA, 0x9A),
    Rgb::new(0xFF, 0x14, 0x93),
];

/// Uniformly pick a palette colour
#[inline]
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_css_and_hex() {
        let c = Rgb::new(255, 105, 180);
        assert_eq!(c.hex(), "#FF69B4");
        assert_eq!(c.with_alpha(0.5).css(), "rgba(255, 105, 180, 0.5)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgb::WHITE.with_alpha(1.7).alpha, 1.0);
        assert_eq!(Rgb::WHITE.with_alpha(-0.2).alpha, 0.0);
    }

    #[test]
    fn test_random_color_comes_from_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert!(PALETTE.contains(&random_color(&mut rng)));
        }
    }
}
