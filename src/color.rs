use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale
// ---------------------------------------------------------------------------

/// Viridis, sampled at ten evenly spaced points.
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

/// Maps a number in a known range onto a colour gradient.  Interpolation
/// happens in linear RGB so midpoints do not go muddy.
#[derive(Debug, Clone)]
pub struct ColorScale {
    encoded: Vec<Srgb<u8>>,
    linear: Vec<LinSrgb>,
}

impl ColorScale {
    pub fn viridis() -> Self {
        let encoded: Vec<Srgb<u8>> = VIRIDIS
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b))
            .collect();
        let linear = encoded.iter().map(|c| c.into_linear()).collect();
        Self { encoded, linear }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn sample(&self, t: f64) -> Srgb<u8> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let last = self.encoded.len() - 1;
        let pos = t * last as f32;
        let i = pos.floor() as usize;
        if i >= last {
            return self.encoded[last];
        }
        let frac = pos - i as f32;
        if frac == 0.0 {
            return self.encoded[i];
        }
        Srgb::from_linear(self.linear[i].mix(self.linear[i + 1], frac))
    }

    /// Colour for `value` with `min` at the bottom of the scale and `max` at
    /// the top.  A degenerate range maps everything to the top.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Srgb<u8> {
        if max <= min {
            return self.sample(1.0);
        }
        self.sample((value - min) / (max - min))
    }
}

/// `#rrggbb` form used by the web renderer.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Parse `#rrggbb` back into components.
pub fn from_hex(hex: &str) -> Option<Srgb<u8>> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}
