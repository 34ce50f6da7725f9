// View-space <-> image-space point mapping.
// A window shows the photo placed according to a content-fit mode (scaled,
// centered, pinned to an edge...). A click arrives in window pixels; the blur
// needs it in photo pixels. This module does that conversion and nothing else.

use std::fmt;

use crate::types::{Point, Size};

/// How content of one size is placed inside a container of another size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentFitMode {
    /// Uniform scale so the whole image is visible; letterboxed on one axis.
    #[default]
    AspectFit,
    /// Uniform scale so the container is covered; the image overflows on one axis.
    AspectFill,
    /// Independent scale per axis so the image exactly covers the container.
    StretchToFill,
    /// Same placement as `StretchToFill`.
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ContentFitMode {
    pub const ALL: [ContentFitMode; 13] = [
        ContentFitMode::AspectFit,
        ContentFitMode::AspectFill,
        ContentFitMode::StretchToFill,
        ContentFitMode::Redraw,
        ContentFitMode::Center,
        ContentFitMode::Top,
        ContentFitMode::Bottom,
        ContentFitMode::Left,
        ContentFitMode::Right,
        ContentFitMode::TopLeft,
        ContentFitMode::TopRight,
        ContentFitMode::BottomLeft,
        ContentFitMode::BottomRight,
    ];

    /// Kebab-case name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ContentFitMode::AspectFit => "aspect-fit",
            ContentFitMode::AspectFill => "aspect-fill",
            ContentFitMode::StretchToFill => "stretch-to-fill",
            ContentFitMode::Redraw => "redraw",
            ContentFitMode::Center => "center",
            ContentFitMode::Top => "top",
            ContentFitMode::Bottom => "bottom",
            ContentFitMode::Left => "left",
            ContentFitMode::Right => "right",
            ContentFitMode::TopLeft => "top-left",
            ContentFitMode::TopRight => "top-right",
            ContentFitMode::BottomLeft => "bottom-left",
            ContentFitMode::BottomRight => "bottom-right",
        }
    }

    /// Lenient lookup. Case, `-`/`_` separators and a leading `scale` are ignored,
    /// so `aspect-fit`, `AspectFit` and `scaleAspectFit` all match.
    ///
    /// Unknown names fall back to `TopLeft`, whose mapping is the identity:
    /// a fit mode we don't understand shifts nothing instead of failing.
    pub fn from_name(name: &str) -> ContentFitMode {
        fn normalize(name: &str) -> String {
            name.chars()
                .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        }

        let key = normalize(name);
        let key = key.strip_prefix("scale").unwrap_or(&key);
        if key == "tofill" || key == "stretch" {
            return ContentFitMode::StretchToFill;
        }

        match ContentFitMode::ALL.into_iter().find(|mode| normalize(mode.name()) == key) {
            Some(mode) => mode,
            None => {
                log::warn!("unknown fit mode {name:?}, falling back to {}", ContentFitMode::TopLeft);
                ContentFitMode::TopLeft
            }
        }
    }
}

impl fmt::Display for ContentFitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the image lands inside the container: an offset of its top-left
/// corner plus a per-axis scale. Image pixel `p` is drawn at `p * scale + origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentPlacement {
    pub origin: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ContentPlacement {
    /// Placement for `content` inside `container` under `mode`.
    /// `None` when the content has a zero side (nothing loaded).
    pub fn resolve(container: Size, content: Size, mode: ContentFitMode) -> Option<Self> {
        if content.is_empty() {
            return None;
        }

        let ratio_x = container.width / content.width;
        let ratio_y = container.height / content.height;

        // Leftover space once the unscaled image is in place.
        let dw = container.width - content.width;
        let dh = container.height - content.height;

        let unscaled = |x: f64, y: f64| ContentPlacement {
            origin: Point::new(x, y),
            scale_x: 1.0,
            scale_y: 1.0,
        };

        let placement = match mode {
            ContentFitMode::AspectFit | ContentFitMode::AspectFill => {
                let scale = if mode == ContentFitMode::AspectFit {
                    ratio_x.min(ratio_y)
                } else {
                    ratio_x.max(ratio_y)
                };
                // Margin left on each side by the uniform scale
                ContentPlacement {
                    origin: Point::new(
                        (container.width - content.width * scale) / 2.0,
                        (container.height - content.height * scale) / 2.0,
                    ),
                    scale_x: scale,
                    scale_y: scale,
                }
            }
            ContentFitMode::StretchToFill | ContentFitMode::Redraw => ContentPlacement {
                origin: Point::ZERO,
                scale_x: ratio_x,
                scale_y: ratio_y,
            },
            ContentFitMode::Center => unscaled(dw / 2.0, dh / 2.0),
            ContentFitMode::Top => unscaled(dw / 2.0, 0.0),
            ContentFitMode::Bottom => unscaled(dw / 2.0, dh),
            ContentFitMode::Left => unscaled(0.0, dh / 2.0),
            ContentFitMode::Right => unscaled(dw, dh / 2.0),
            ContentFitMode::TopLeft => unscaled(0.0, 0.0),
            ContentFitMode::TopRight => unscaled(dw, 0.0),
            ContentFitMode::BottomLeft => unscaled(0.0, dh),
            ContentFitMode::BottomRight => unscaled(dw, dh),
        };
        Some(placement)
    }

    /// View-space -> image-space. Subtract the offset, then undo the scale.
    pub fn to_content(&self, view_point: Point) -> Point {
        Point::new(
            (view_point.x - self.origin.x) / self.scale_x,
            (view_point.y - self.origin.y) / self.scale_y,
        )
    }

    /// Image-space -> view-space.
    pub fn to_view(&self, content_point: Point) -> Point {
        Point::new(
            content_point.x * self.scale_x + self.origin.x,
            content_point.y * self.scale_y + self.origin.y,
        )
    }
}

/// Map a point in the container (window) to the matching point in the content
/// (image). Pure; the result is not clamped, so a click in the letterbox maps
/// outside `[0, content]`. Zero-sized content maps everything to the origin.
pub fn map_view_point_to_content(
    view_point: Point,
    container_size: Size,
    content_size: Size,
    fit_mode: ContentFitMode,
) -> Point {
    match ContentPlacement::resolve(container_size, content_size, fit_mode) {
        Some(placement) => placement.to_content(view_point),
        None => Point::ZERO,
    }
}
