// The selective-focus render step: photo + focus region in, focused photo out.
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{FocusRegion, FrameBuffer};
use crate::vision::{blend_linear_in_place, box_blur_rgb, radial_mask};

/// Blur strength used when nothing else is configured.
pub const DEFAULT_BLUR_POWER: f32 = 15.0;
/// Strongest blur a renderer accepts.
pub const MAX_BLUR_POWER: f32 = 30.0;

/// Produces the photo with everything outside `region` progressively blurred.
///
/// `None` means the render failed; callers keep whatever they showed before.
pub trait FocusRenderer {
    fn render(&self, base: &FrameBuffer, region: &FocusRegion, blur_power: f32) -> Option<FrameBuffer>;
}

impl<R: FocusRenderer + ?Sized> FocusRenderer for &R {
    fn render(&self, base: &FrameBuffer, region: &FocusRegion, blur_power: f32) -> Option<FrameBuffer> {
        (**self).render(base, region, blur_power)
    }
}

/// Software renderer: box blur + radial mask + linear-light blend.
pub struct MaskedBlurRenderer {
    lut: GammaLut,
}

impl MaskedBlurRenderer {
    pub fn new() -> Self {
        Self { lut: GammaLut::new() }
    }

    fn try_render(&self, base: &FrameBuffer, region: &FocusRegion, blur_power: f32) -> Result<FrameBuffer, Error> {
        if !(0.0..=MAX_BLUR_POWER).contains(&blur_power) {
            return Err(Error::Render(format!(
                "blur power {blur_power} outside 0..={MAX_BLUR_POWER}"
            )));
        }
        if base.pixels.len() != base.width * base.height {
            return Err(Error::Render("base image: pixel count does not match size".into()));
        }

        let mut tmp = FrameBuffer::new(base.width, base.height);
        let mut blurred = FrameBuffer::new(base.width, base.height);
        box_blur_rgb(base, &mut tmp, &mut blurred, blur_power.round() as usize)?;

        let mask = radial_mask(base.width, base.height, region);
        let mut out = base.clone();
        blend_linear_in_place(&mut out, &blurred, &mask, &self.lut)?;
        Ok(out)
    }
}

impl Default for MaskedBlurRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRenderer for MaskedBlurRenderer {
    fn render(&self, base: &FrameBuffer, region: &FocusRegion, blur_power: f32) -> Option<FrameBuffer> {
        match self.try_render(base, region, blur_power) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("masked blur failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn checkerboard(width: usize, height: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                fb.pixels[y * width + x] = if (x + y) % 2 == 0 { 0x00_FF_FF_FF } else { 0 };
            }
        }
        fb
    }

    #[test]
    fn focus_center_stays_sharp_and_edges_blur() {
        let base = checkerboard(64, 64);
        let region = FocusRegion::new(Point::new(32.0, 32.0), 8.0, 20.0);
        let out = MaskedBlurRenderer::new().render(&base, &region, 3.0).unwrap();

        assert_eq!(out.pixels[32 * 64 + 32], base.pixels[32 * 64 + 32]);
        assert_eq!(out.pixels[32 * 64 + 33], base.pixels[32 * 64 + 33]);
        // Corner is fully blurred: a checkerboard averages to grey
        let corner = out.pixels[0];
        assert_ne!(corner, base.pixels[0]);
        let r = (corner >> 16) & 0xFF;
        assert!((90..=170).contains(&r), "{r}");
    }

    #[test]
    fn zero_blur_power_returns_the_photo() {
        let base = checkerboard(8, 8);
        let region = FocusRegion::new(Point::ZERO, 0.0, 0.0);
        let out = MaskedBlurRenderer::new().render(&base, &region, 0.0).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn blur_power_above_max_fails() {
        let base = checkerboard(8, 8);
        let region = FocusRegion::initial(base.size());
        assert!(MaskedBlurRenderer::new().render(&base, &region, MAX_BLUR_POWER + 1.0).is_none());
        assert!(MaskedBlurRenderer::new().render(&base, &region, MAX_BLUR_POWER).is_some());
    }

    #[test]
    fn empty_or_malformed_image_fails() {
        let region = FocusRegion::new(Point::ZERO, 1.0, 2.0);
        let renderer = MaskedBlurRenderer::new();
        assert!(renderer.render(&FrameBuffer::new(0, 0), &region, DEFAULT_BLUR_POWER).is_none());

        let broken = FrameBuffer { width: 4, height: 4, pixels: vec![0; 3] };
        assert!(renderer.render(&broken, &region, DEFAULT_BLUR_POWER).is_none());
    }
}
