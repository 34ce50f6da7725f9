// Focus state and the event-driven update around it.
//
// The state is a small immutable snapshot. Every tap or pinch goes through
// `update`, which returns the next snapshot plus whether the photo must be
// re-rendered. `FocusController` owns the current snapshot and the images and
// calls the renderer when a transition asks for it.

use crate::mapping::{map_view_point_to_content, ContentFitMode};
use crate::render::FocusRenderer;
use crate::types::{FocusRegion, FrameBuffer, Point, Size};

/// Outer (fully blurred) radius as a multiple of the inner (sharp) radius
/// while pinching.
pub const OUTER_TO_INNER: f64 = 2.5;

/// Pinch scale range. Below it the sharp area vanishes, above it the rings
/// are far outside any window.
pub const MIN_PINCH_SCALE: f64 = 0.05;
pub const MAX_PINCH_SCALE: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Input the focus logic understands, independent of any windowing library.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusEvent {
    /// Click/tap at a view-space position.
    Tap { point: Point },
    /// Pinch with the gesture's accumulated scale (1.0 = unchanged).
    Pinch { scale: f64, phase: PinchPhase },
}

/// How the photo is laid out in the window; what a tap needs to reach image-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub container: Size,
    pub content: Size,
    pub fit_mode: ContentFitMode,
}

impl Viewport {
    pub fn to_content(&self, view_point: Point) -> Point {
        map_view_point_to_content(view_point, self.container, self.content, self.fit_mode)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusState {
    region: FocusRegion,
    /// Image width the pinch radius is derived from.
    base_width: f64,
    /// Scale of the pinch in progress; 1.0 when idle.
    pinch_scale: f64,
}

impl FocusState {
    pub fn initial(image_size: Size) -> Self {
        Self {
            region: FocusRegion::initial(image_size),
            base_width: image_size.width,
            pinch_scale: 1.0,
        }
    }

    pub fn region(&self) -> FocusRegion {
        self.region
    }

    pub fn pinch_scale(&self) -> f64 {
        self.pinch_scale
    }

    /// Sharp radius before any pinch scaling: a quarter of the image width.
    pub fn base_radius(&self) -> f64 {
        self.base_width / 4.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: FocusState,
    pub render: bool,
}

/// Next state for `event`. Pure: no rendering, no I/O beyond debug logs.
pub fn update(state: &FocusState, event: FocusEvent, viewport: &Viewport) -> Transition {
    match event {
        // Visual: focus jumps to the clicked photo pixel and the blur redraws at once
        FocusEvent::Tap { point } => {
            let center = viewport.to_content(point);
            Transition {
                state: FocusState { region: state.region.with_center(center), ..*state },
                render: true,
            }
        }
        // Visual: rings grow/shrink with the wheel; photo keeps its old blur
        FocusEvent::Pinch { scale, phase: PinchPhase::Began | PinchPhase::Changed } => {
            let scale = scale.clamp(MIN_PINCH_SCALE, MAX_PINCH_SCALE);
            let inner = state.base_radius() * scale;
            let region = state.region.with_radii(inner, inner * OUTER_TO_INNER);
            log::debug!(
                "pinch x{scale:.3}: inner radius {:.1}, outer radius {:.1}",
                region.inner_radius(),
                region.outer_radius()
            );
            Transition {
                state: FocusState { region, pinch_scale: scale, ..*state },
                render: false,
            }
        }
        // Visual: blur catches up with the rings
        FocusEvent::Pinch { phase: PinchPhase::Ended | PinchPhase::Cancelled, .. } => Transition {
            state: FocusState { pinch_scale: 1.0, ..*state },
            render: true,
        },
    }
}

pub struct FocusController<R> {
    state: FocusState,
    viewport: Viewport,
    base: FrameBuffer,
    displayed: FrameBuffer,
    renderer: R,
    blur_power: f32,
}

impl<R: FocusRenderer> FocusController<R> {
    /// Takes ownership of the photo. Nothing is rendered until
    /// `render_initial` or the first event that asks for it.
    pub fn new(base: FrameBuffer, renderer: R, container: Size, fit_mode: ContentFitMode, blur_power: f32) -> Self {
        let content = base.size();
        Self {
            state: FocusState::initial(content),
            viewport: Viewport { container, content, fit_mode },
            displayed: base.clone(),
            base,
            renderer,
            blur_power,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn displayed(&self) -> &FrameBuffer {
        &self.displayed
    }

    pub fn blur_power(&self) -> f32 {
        self.blur_power
    }

    /// The window changed size; later taps map against the new area.
    pub fn resize(&mut self, container: Size) {
        self.viewport.container = container;
    }

    /// First render with the starting focus region.
    pub fn render_initial(&mut self) -> bool {
        self.rerender()
    }

    /// Apply one event. Returns true when the displayed image changed.
    pub fn handle(&mut self, event: FocusEvent) -> bool {
        let Transition { state, render } = update(&self.state, event, &self.viewport);
        self.state = state;
        render && self.rerender()
    }

    fn rerender(&mut self) -> bool {
        match self.renderer.render(&self.base, &self.state.region(), self.blur_power) {
            Some(image) => {
                self.displayed = image;
                true
            }
            None => {
                log::warn!("render failed, keeping the previous image");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts calls and returns a solid frame tagged with the call number.
    struct CountingRenderer {
        calls: Cell<usize>,
    }

    impl CountingRenderer {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl FocusRenderer for CountingRenderer {
        fn render(&self, base: &FrameBuffer, _region: &FocusRegion, _blur_power: f32) -> Option<FrameBuffer> {
            self.calls.set(self.calls.get() + 1);
            let tag = self.calls.get() as u32;
            Some(FrameBuffer { width: base.width, height: base.height, pixels: vec![tag; base.pixels.len()] })
        }
    }

    struct FailingRenderer;

    impl FocusRenderer for FailingRenderer {
        fn render(&self, _base: &FrameBuffer, _region: &FocusRegion, _blur_power: f32) -> Option<FrameBuffer> {
            None
        }
    }

    fn viewport(container: Size, content: Size, fit_mode: ContentFitMode) -> Viewport {
        Viewport { container, content, fit_mode }
    }

    #[test]
    fn tap_moves_center_through_the_mapper() {
        let content = Size::new(400.0, 300.0);
        let vp = viewport(Size::new(800.0, 300.0), content, ContentFitMode::AspectFit);
        let state = FocusState::initial(content);

        let t = update(&state, FocusEvent::Tap { point: Point::new(500.0, 150.0) }, &vp);
        assert!(t.render);
        assert_eq!(t.state.region().center(), Point::new(300.0, 150.0));
        assert_eq!(t.state.region().inner_radius(), state.region().inner_radius());
        assert_eq!(t.state.region().outer_radius(), state.region().outer_radius());
    }

    #[test]
    fn update_leaves_the_old_snapshot_alone() {
        let content = Size::new(200.0, 200.0);
        let vp = viewport(content, content, ContentFitMode::TopLeft);
        let state = FocusState::initial(content);
        let before = state;
        let _ = update(&state, FocusEvent::Tap { point: Point::new(1.0, 2.0) }, &vp);
        let _ = update(&state, FocusEvent::Pinch { scale: 3.0, phase: PinchPhase::Changed }, &vp);
        assert_eq!(state, before);
    }

    #[test]
    fn pinch_scales_inner_radius_and_derives_outer() {
        // Quarter-width base radius of 50
        let content = Size::new(200.0, 120.0);
        let vp = viewport(content, content, ContentFitMode::AspectFit);
        let state = FocusState::initial(content);
        assert_eq!(state.base_radius(), 50.0);

        for phase in [PinchPhase::Began, PinchPhase::Changed] {
            let t = update(&state, FocusEvent::Pinch { scale: 2.0, phase }, &vp);
            assert!(!t.render);
            assert_eq!(t.state.region().inner_radius(), 100.0);
            assert_eq!(t.state.region().outer_radius(), 250.0);
            assert_eq!(t.state.pinch_scale(), 2.0);
        }
    }

    #[test]
    fn pinch_scale_is_bounded() {
        let content = Size::new(200.0, 120.0);
        let vp = viewport(content, content, ContentFitMode::AspectFit);
        let state = FocusState::initial(content);

        let huge = update(&state, FocusEvent::Pinch { scale: 1e13, phase: PinchPhase::Changed }, &vp).state;
        assert_eq!(huge.pinch_scale(), MAX_PINCH_SCALE);
        assert_eq!(huge.region().inner_radius(), 50.0 * MAX_PINCH_SCALE);

        let tiny = update(&state, FocusEvent::Pinch { scale: 1e-13, phase: PinchPhase::Changed }, &vp).state;
        assert_eq!(tiny.pinch_scale(), MIN_PINCH_SCALE);
        assert_eq!(tiny.region().inner_radius(), 50.0 * MIN_PINCH_SCALE);
    }

    #[test]
    fn pinch_end_resets_scale_and_keeps_radii() {
        let content = Size::new(200.0, 120.0);
        let vp = viewport(content, content, ContentFitMode::AspectFit);
        let pinched = update(
            &FocusState::initial(content),
            FocusEvent::Pinch { scale: 2.0, phase: PinchPhase::Changed },
            &vp,
        )
        .state;

        for phase in [PinchPhase::Ended, PinchPhase::Cancelled] {
            let t = update(&pinched, FocusEvent::Pinch { scale: 2.0, phase }, &vp);
            assert!(t.render);
            assert_eq!(t.state.pinch_scale(), 1.0);
            assert_eq!(t.state.region(), pinched.region());
        }
    }

    #[test]
    fn pinch_renders_once_on_end() {
        let renderer = CountingRenderer::new();
        let base = FrameBuffer::new(200, 120);
        let mut controller = FocusController::new(
            base,
            &renderer,
            Size::new(400.0, 240.0),
            ContentFitMode::AspectFit,
            15.0,
        );

        assert!(!controller.handle(FocusEvent::Pinch { scale: 1.5, phase: PinchPhase::Began }));
        assert!(!controller.handle(FocusEvent::Pinch { scale: 2.0, phase: PinchPhase::Changed }));
        assert_eq!(controller.state().region().inner_radius(), 100.0);
        assert_eq!(controller.state().region().outer_radius(), 250.0);
        assert_eq!(renderer.calls.get(), 0);

        assert!(controller.handle(FocusEvent::Pinch { scale: 2.0, phase: PinchPhase::Ended }));
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(controller.state().pinch_scale(), 1.0);
        assert_eq!(controller.displayed().pixels[0], 1);
    }

    #[test]
    fn tap_renders_and_updates_display() {
        let renderer = CountingRenderer::new();
        let mut controller = FocusController::new(
            FrameBuffer::new(400, 300),
            &renderer,
            Size::new(800.0, 300.0),
            ContentFitMode::AspectFit,
            15.0,
        );
        assert!(controller.render_initial());
        assert!(controller.handle(FocusEvent::Tap { point: Point::new(500.0, 150.0) }));
        assert_eq!(renderer.calls.get(), 2);
        assert_eq!(controller.state().region().center(), Point::new(300.0, 150.0));
        assert_eq!(controller.displayed().pixels[0], 2);
    }

    #[test]
    fn failed_render_keeps_previous_image() {
        let mut base = FrameBuffer::new(4, 4);
        base.pixels[5] = 0x00_12_34_56;
        let mut controller =
            FocusController::new(base.clone(), FailingRenderer, Size::new(4.0, 4.0), ContentFitMode::TopLeft, 15.0);

        assert!(!controller.render_initial());
        assert!(!controller.handle(FocusEvent::Tap { point: Point::new(1.0, 1.0) }));
        assert_eq!(controller.displayed(), &base);
        // The focus still moved even though nothing was drawn
        assert_eq!(controller.state().region().center(), Point::new(1.0, 1.0));
    }

    #[test]
    fn resize_changes_tap_mapping() {
        let renderer = CountingRenderer::new();
        let mut controller = FocusController::new(
            FrameBuffer::new(400, 300),
            &renderer,
            Size::new(400.0, 300.0),
            ContentFitMode::AspectFit,
            15.0,
        );
        controller.resize(Size::new(800.0, 300.0));
        controller.handle(FocusEvent::Tap { point: Point::new(500.0, 150.0) });
        assert_eq!(controller.state().region().center(), Point::new(300.0, 150.0));
    }
}
