// Pixel operations behind the selective-focus effect:
// a box blur of the whole photo, a radial mask around the focus point,
// and a linear-light blend of the blurred copy over the sharp one.
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{FocusRegion, FrameBuffer, Mask, Point};

#[inline]
fn unpack(px: u32) -> [u32; 3] {
    [(px >> 16) & 0xFF, (px >> 8) & 0xFF, px & 0xFF]
}

#[inline]
fn pack(rgb: [u32; 3]) -> u32 {
    (rgb[0] << 16) | (rgb[1] << 8) | rgb[2]
}

/// One sliding-window pass over `lines` runs of `len` pixels each.
/// `at(line, i)` gives the buffer index of pixel `i` on `line`; edges are
/// extended so borders don't darken.
fn box_pass(
    src: &[u32],
    dst: &mut [u32],
    lines: usize,
    len: usize,
    radius: usize,
    at: impl Fn(usize, usize) -> usize,
) {
    let win = (2 * radius + 1) as u32;
    let last = len - 1;

    for line in 0..lines {
        // Window centered on i = 0: r+1 copies of the edge pixel plus [1..=r]
        let mut sum = unpack(src[at(line, 0)]).map(|c| c * (radius as u32 + 1));
        for i in 1..=radius {
            let p = unpack(src[at(line, i.min(last))]);
            for c in 0..3 { sum[c] += p[c]; }
        }

        for i in 0..len {
            dst[at(line, i)] = pack(sum.map(|s| s / win));

            let out = unpack(src[at(line, i.saturating_sub(radius))]);
            let inc = unpack(src[at(line, (i + radius + 1).min(last))]);
            for c in 0..3 { sum[c] = sum[c] + inc[c] - out[c]; }
        }
    }
}

/// Separable box blur: horizontal into `tmp`, then vertical into `dst`.
pub fn box_blur_rgb(
    src: &FrameBuffer,
    tmp: &mut FrameBuffer,
    dst: &mut FrameBuffer,
    radius: usize,
) -> Result<(), Error> {
    if src.width != dst.width || src.height != dst.height {
        return Err(Error::Render("box_blur: size mismatch src/dst".into()));
    }
    if tmp.width != src.width || tmp.height != src.height {
        return Err(Error::Render("box_blur: size mismatch tmp".into()));
    }
    if src.width == 0 || src.height == 0 {
        return Err(Error::Render("box_blur: empty frame".into()));
    }
    let (w, h) = (src.width, src.height);

    box_pass(&src.pixels, &mut tmp.pixels, h, w, radius, |y, x| y * w + x);
    box_pass(&tmp.pixels, &mut dst.pixels, w, h, radius, |x, y| y * w + x);
    Ok(())
}

/// Blur weight for a pixel `distance` away from the focus center:
/// 0 inside the inner radius, 1 past the outer radius, linear between.
pub fn falloff(distance: f64, region: &FocusRegion) -> f32 {
    let (inner, outer) = (region.inner_radius(), region.outer_radius());
    if distance <= inner {
        0.0
    } else if distance >= outer {
        1.0
    } else {
        ((distance - inner) / (outer - inner)) as f32
    }
}

/// Radial gradient mask sized like the photo, sampled at pixel centers.
pub fn radial_mask(width: usize, height: usize, region: &FocusRegion) -> Mask {
    let center = region.center();
    let mut alpha = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            alpha.push(falloff(p.distance_to(center), region));
        }
    }
    Mask { width, height, alpha }
}

/// Mix `blurred` into `sharp` where the mask says so, in linear light.
pub fn blend_linear_in_place(
    sharp: &mut FrameBuffer,
    blurred: &FrameBuffer,
    mask: &Mask,
    lut: &GammaLut,
) -> Result<(), Error> {
    if sharp.width != blurred.width || sharp.height != blurred.height {
        return Err(Error::Render("blend: dimension mismatch".into()));
    }
    if mask.width != sharp.width || mask.height != sharp.height {
        return Err(Error::Render("blend: mask dimension mismatch".into()));
    }

    for ((dst, &soft), &a) in sharp.pixels.iter_mut().zip(&blurred.pixels).zip(&mask.alpha) {
        if a <= 0.0 { continue; }            // in focus
        if a >= 1.0 { *dst = soft; continue; } // fully blurred

        let f = unpack(*dst);
        let s = unpack(soft);
        let inv = 1.0 - a;
        let mixed = [0, 1, 2].map(|c| {
            let lin = a * lut.srgb_u8_to_linear(s[c] as u8) + inv * lut.srgb_u8_to_linear(f[c] as u8);
            lut.linear_to_srgb_u8(lin) as u32
        });
        *dst = pack(mixed);
    }
    Ok(())
}
