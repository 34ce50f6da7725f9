// Puts the photo into the window the same way taps are mapped back out of it.
// Every window pixel center goes through the content-fit placement and samples
// the nearest photo pixel, so what you click is exactly what you see.

use crate::mapping::{ContentFitMode, ContentPlacement};
use crate::types::{FrameBuffer, Point};

/// Color for window pixels the photo doesn't cover.
pub const BACKGROUND: u32 = 0x00_00_00_00;

/// Photo index along one axis for window coordinate `view`, if it lands on the photo.
fn sample_index(view: f64, to_content: impl Fn(f64) -> f64, len: usize) -> Option<usize> {
    let c = to_content(view).floor();
    if c >= 0.0 && c < len as f64 { Some(c as usize) } else { None }
}

/// Draw `image` into `screen` under `fit_mode`, nearest-neighbour.
pub fn compose_into(screen: &mut FrameBuffer, image: &FrameBuffer, fit_mode: ContentFitMode) {
    let Some(placement) = ContentPlacement::resolve(screen.size(), image.size(), fit_mode) else {
        // Visual: empty photo or window shows a black screen
        screen.pixels.fill(BACKGROUND);
        return;
    };

    // The placement is separable, so map each column and row once.
    let cols: Vec<Option<usize>> = (0..screen.width)
        .map(|x| sample_index(x as f64 + 0.5, |v| placement.to_content(Point::new(v, 0.0)).x, image.width))
        .collect();
    let rows: Vec<Option<usize>> = (0..screen.height)
        .map(|y| sample_index(y as f64 + 0.5, |v| placement.to_content(Point::new(0.0, v)).y, image.height))
        .collect();

    // Visual: rows/columns outside the photo become letterbox bars
    for (y, row) in rows.iter().enumerate() {
        let out = &mut screen.pixels[y * screen.width..(y + 1) * screen.width];
        match row {
            None => out.fill(BACKGROUND),
            Some(iy) => {
                let src = &image.pixels[iy * image.width..(iy + 1) * image.width];
                for (dst, col) in out.iter_mut().zip(&cols) {
                    *dst = col.map_or(BACKGROUND, |ix| src[ix]);
                }
            }
        }
    }
}
