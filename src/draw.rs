// Window + software drawing utilities.
// 1) A window that shows the focused photo and reports mouse/wheel input.
// 2) Focus rings and a crosshair drawn over the photo.
// 3) A tiny 5x7 bitmap font for the status line.

use std::time::Instant;

use crate::error::Error;
use crate::focus::FocusState;
use crate::gesture::InputSample;
use crate::mapping::ContentPlacement;
use crate::types::{FocusRegion, FrameBuffer, Point, Size};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a resizable window of the requested size.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the frame to the screen. Also pumps window events.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without drawing (minimized window).
    pub fn pump(&mut self) {
        self.window.update();
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Escape went down since the last update (no key repeat).
    pub fn esc_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Current drawable area in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Poll everything the gesture recognizer needs.
    pub fn sample(&mut self, now: Instant) -> InputSample {
        InputSample {
            now,
            // Discard: clicks outside the window are not taps
            mouse: self
                .window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| Point::new(x as f64, y as f64)),
            left_down: self.window.get_mouse_down(MouseButton::Left),
            scroll_y: self.window.get_scroll_wheel().map_or(0.0, |(_, dy)| dy as f64),
            active: self.window.is_active(),
            escape: self.esc_pressed_once(),
        }
    }
}

/* ---------- Software drawing: pixels, lines, rings, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 || x as usize >= fb.width || y as usize >= fb.height {
        return;
    }
    fb.pixels[y as usize * fb.width + x as usize] = color;
}

/// Bresenham line between two pixels.
fn draw_line(fb: &mut FrameBuffer, from: (i32, i32), to: (i32, i32), color: u32) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x, y, color);
        if (x, y) == to { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x += sx; }
        if e2 <= dx { err += dx; y += sy; }
    }
}

/// "+" centered at (cx,cy) with a small gap in the middle.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, (cx - size, cy), (cx - 2, cy), color);
    draw_line(fb, (cx + 2, cy), (cx + size, cy), color);
    draw_line(fb, (cx, cy - size), (cx, cy - 2), color);
    draw_line(fb, (cx, cy + 2), (cx, cy + size), color);
    put_pixel(fb, cx, cy, color);
}

/// Cut the segment a-b down to the part inside the framebuffer plus a 1px
/// margin (Liang-Barsky). `None` when it misses the framebuffer entirely.
fn clip_segment(fb: &FrameBuffer, a: Point, b: Point) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (w, h) = (fb.width as f64, fb.height as f64);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, a.x + 1.0), (dx, w - a.x), (-dy, a.y + 1.0), (dy, h - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 { return None; }
                t0 = t0.max(r);
            } else {
                if r < t0 { return None; }
                t1 = t1.min(r);
            }
        }
    }
    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

fn to_pixel(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Axis-aligned ellipse outline. Non-uniform fit modes turn focus circles into these.
/// Only the part crossing the framebuffer is drawn.
pub fn draw_ellipse(fb: &mut FrameBuffer, center: Point, rx: f64, ry: f64, color: u32) {
    if !(rx.is_finite() && ry.is_finite() && center.x.is_finite() && center.y.is_finite()) {
        return;
    }
    if rx <= 0.0 || ry <= 0.0 || fb.pixels.is_empty() {
        return;
    }
    let (w, h) = (fb.width as f64, fb.height as f64);

    // Visual: ring entirely off to one side, nothing to draw
    if center.x + rx < -1.0 || center.x - rx > w || center.y + ry < -1.0 || center.y - ry > h {
        return;
    }
    // Visual: ring larger than the window all around, nothing to draw either
    let inside = |x: f64, y: f64| ((x - center.x) / rx).powi(2) + ((y - center.y) / ry).powi(2) < 1.0;
    if inside(-1.0, -1.0) && inside(w, -1.0) && inside(-1.0, h) && inside(w, h) {
        return;
    }

    // Roughly one step per pixel of circumference
    let steps = ((rx.max(ry) * std::f64::consts::TAU).ceil() as usize).clamp(16, 20_000);
    let at = |i: usize| {
        let t = i as f64 / steps as f64 * std::f64::consts::TAU;
        Point::new(center.x + rx * t.cos(), center.y + ry * t.sin())
    };
    let mut prev = at(0);
    for i in 1..=steps {
        let next = at(i);
        if let Some((a, b)) = clip_segment(fb, prev, next) {
            draw_line(fb, to_pixel(a), to_pixel(b), color);
        }
        prev = next;
    }
}

/// Inner and outer focus rings plus a crosshair, in window coordinates.
pub fn draw_focus_overlay(fb: &mut FrameBuffer, region: &FocusRegion, placement: &ContentPlacement) {
    const INNER: u32 = 0x00_FF_CC_33; // yellow: sharp edge
    const OUTER: u32 = 0x00_66_99_FF; // blue: full blur starts

    const ARM: f64 = 12.0;

    // Visual: the photo-space focus center lands where the photo is drawn
    let c = placement.to_view(region.center());
    let (sx, sy) = (placement.scale_x.abs(), placement.scale_y.abs());
    draw_ellipse(fb, c, region.inner_radius() * sx, region.inner_radius() * sy, INNER);
    draw_ellipse(fb, c, region.outer_radius() * sx, region.outer_radius() * sy, OUTER);

    // Visual: crosshair only when some arm can reach the window
    let near_x = c.x >= -ARM && c.x <= fb.width as f64 + ARM;
    let near_y = c.y >= -ARM && c.y <= fb.height as f64 + ARM;
    if near_x && near_y {
        draw_crosshair(fb, c.x.round() as i32, c.y.round() as i32, ARM as i32, INNER);
    }
}

/* ---------- 5x7 bitmap font (just what the status line prints) ---------- */

// Each row's low 5 bits are pixels, bit 4 = leftmost.
const GLYPHS: &[(char, [u8; 7])] = &[
    ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('3', [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    ('6', [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    ('B', [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
    ('C', [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
    ('F', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
    ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    ('O', [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('R', [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
    ('S', [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
    ('X', [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
    ('U', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('|', [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
    (',', [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000]),
    ('/', [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000]),
    ('-', [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000]),
    ('.', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000]),
];

fn glyph5x7(ch: char) -> Option<&'static [u8; 7]> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

fn blit_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], color: u32) {
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if bits & (1 << (4 - rx)) != 0 {
                put_pixel(fb, x + rx, y + ry as i32, color);
            }
        }
    }
}

/// Draw text with 5x7 glyphs, 1px spacing and a black drop shadow.
/// Characters without a glyph (including space) just advance.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        // Visual: shadow one pixel down-right keeps text readable on bright photos
        if let Some(rows) = glyph5x7(ch) {
            blit_glyph(fb, x + 1, y + 1, rows, 0x00_00_00_00);
            blit_glyph(fb, x, y, rows, color);
        }
        x += 6;
    }
}

/// Status line: focus center (photo pixels), radii, blur power and, while
/// pinching, the gesture scale.
pub fn status_line(state: &FocusState, blur_power: f32) -> String {
    let region = state.region();
    let c = region.center();
    let mut line = format!(
        "FOCUS {:.0},{:.0} | R {:.0}/{:.0} | BLUR {:.0}",
        c.x,
        c.y,
        region.inner_radius(),
        region.outer_radius(),
        blur_power
    );
    if state.pinch_scale() != 1.0 {
        line.push_str(&format!(" | X{:.2}", state.pinch_scale()));
    }
    line
}

/// Window size as the mapper's `Size`.
pub fn window_size((width, height): (usize, usize)) -> Size {
    Size::new(width as f64, height as f64)
}
