// Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::mapping::ContentFitMode;
use crate::render::{DEFAULT_BLUR_POWER, MAX_BLUR_POWER};

#[derive(Parser, Debug)]
#[command(about = "Tap to move the focus point, scroll to resize it", long_about = None)]
pub struct Args {
    /// Photo to open
    pub image: PathBuf,
    /// How the photo is laid out in the window (aspect-fit, aspect-fill,
    /// stretch-to-fill, redraw, center, top, bottom, left, right, top-left,
    /// top-right, bottom-left, bottom-right). Unknown names act like top-left.
    #[arg(long, default_value = "aspect-fit", value_parser = parse_fit_mode)]
    pub fit_mode: ContentFitMode,
    /// Blur strength outside the focus region (0-30)
    #[arg(long, default_value_t = DEFAULT_BLUR_POWER, value_parser = parse_blur_power)]
    pub blur_power: f32,
    /// Initial window width
    #[arg(long, default_value_t = 800)]
    pub width: usize,
    /// Initial window height
    #[arg(long, default_value_t = 600)]
    pub height: usize,
}

fn parse_fit_mode(name: &str) -> Result<ContentFitMode, String> {
    Ok(ContentFitMode::from_name(name))
}

fn parse_blur_power(raw: &str) -> Result<f32, String> {
    let power: f32 = raw.parse().map_err(|e| format!("{raw:?} is not a number: {e}"))?;
    if (0.0..=MAX_BLUR_POWER).contains(&power) {
        Ok(power)
    } else {
        Err(format!("blur power must be between 0 and {MAX_BLUR_POWER}"))
    }
}
