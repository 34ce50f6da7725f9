// Core types shared by the mapper, the controller and the renderer.

/// A width/height pair. Either the window area or the image's pixel size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero (nothing to map onto).
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// A position in view-space (window pixels) or image-space (source pixels).
/// Which one is up to the caller; only the mapper converts between them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where the photo stays sharp, and where it is fully blurred.
/// Inside `inner_radius`: sharp. Beyond `outer_radius`: full blur. Linear between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusRegion {
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
}

impl FocusRegion {
    /// Builds a region with `outer >= inner >= 0` enforced.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        let inner_radius = inner_radius.max(0.0);
        let outer_radius = outer_radius.max(inner_radius);
        Self { center, inner_radius, outer_radius }
    }

    /// Starting region for an image of `size`: centered, a quarter of the
    /// short side sharp, fully blurred past two thirds of it.
    pub fn initial(size: Size) -> Self {
        let short = size.width.min(size.height);
        Self::new(
            Point::new(size.width / 2.0, size.height / 2.0),
            short / 4.0,
            short / 1.5,
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }

    pub fn with_radii(self, inner_radius: f64, outer_radius: f64) -> Self {
        Self::new(self.center, inner_radius, outer_radius)
    }
}

/// Packed pixels of a photo or of the window contents, row-major,
/// one `0x00RRGGBB` word per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// All-black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Alpha mask in [0,1] per pixel; 0 = keep the sharp photo, 1 = use the blurred one.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,   // length = width * height, values clamped to [0.0, 1.0]
}
