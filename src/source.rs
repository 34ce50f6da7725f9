// Loads the photo to focus on and converts it into a buffer the window can show.
// Every pixel ends up packed as 0x00RRGGBB.

use std::path::Path;

use image::RgbImage;

use crate::error::Error;
use crate::types::FrameBuffer;

/// Decode `path` (any format the `image` crate knows) into a frame buffer.
pub fn load_frame(path: &Path) -> Result<FrameBuffer, Error> {
    let decoded = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    let frame = frame_from_rgb(&decoded.to_rgb8());
    if frame.width == 0 || frame.height == 0 {
        return Err(Error::ImageLoad(format!("{}: image has no pixels", path.display())));
    }
    log::info!("loaded {} ({}x{})", path.display(), frame.width, frame.height);
    Ok(frame)
}

/// Pack an RGB image row by row.
pub fn frame_from_rgb(rgb: &RgbImage) -> FrameBuffer {
    let (w, h) = rgb.dimensions();
    let pixels = rgb
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}
