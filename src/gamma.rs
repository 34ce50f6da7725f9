// sRGB <-> linear-light lookup tables for the focus blend.
// Mixing sharp and blurred pixels in linear light keeps the focus falloff
// free of the dark fringe a plain sRGB lerp leaves behind.

const LINEAR_STEPS: usize = 4096;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn linear_to_srgb(l: f32) -> f32 {
    if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 }
}

pub struct GammaLut {
    // one entry per 8-bit channel value
    to_linear: [f32; 256],
    // linear [0,1] quantized to LINEAR_STEPS buckets
    to_srgb: [u8; LINEAR_STEPS],
}

impl GammaLut {
    /// Build both tables. Done once per renderer.
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            *slot = srgb_to_linear(v as f32 / 255.0);
        }

        let mut to_srgb = [0u8; LINEAR_STEPS];
        let last = (LINEAR_STEPS - 1) as f32;
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let s = linear_to_srgb(i as f32 / last);
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb[idx]
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let lut = GammaLut::new();
        assert_eq!(lut.srgb_u8_to_linear(0), 0.0);
        assert!((lut.srgb_u8_to_linear(255) - 1.0).abs() < 1e-6);
        assert_eq!(lut.linear_to_srgb_u8(0.0), 0);
        assert_eq!(lut.linear_to_srgb_u8(1.0), 255);
    }

    #[test]
    fn round_trip_stays_within_one_step() {
        let lut = GammaLut::new();
        for v in 0..=255u8 {
            let back = lut.linear_to_srgb_u8(lut.srgb_u8_to_linear(v));
            assert!((back as i32 - v as i32).abs() <= 1, "{v} -> {back}");
        }
    }

    #[test]
    fn out_of_range_linear_is_clamped() {
        let lut = GammaLut::new();
        assert_eq!(lut.linear_to_srgb_u8(-0.5), 0);
        assert_eq!(lut.linear_to_srgb_u8(7.0), 255);
    }
}
