// Turns raw window input (button state, wheel deltas, the clock) into
// `FocusEvent`s. A desktop has no pinch, so the scroll wheel plays that role:
// wheel movement grows or shrinks the gesture scale, and a short pause ends it.

use std::time::{Duration, Instant};

use crate::focus::{FocusEvent, PinchPhase, MAX_PINCH_SCALE, MIN_PINCH_SCALE};
use crate::types::Point;

/// No wheel movement for this long ends the pinch.
pub const PINCH_IDLE: Duration = Duration::from_millis(150);
/// Scale change per wheel unit (exponential, so scale stays positive).
pub const SCROLL_SENSITIVITY: f64 = 0.1;

/// One poll of the window.
#[derive(Clone, Copy, Debug)]
pub struct InputSample {
    pub now: Instant,
    /// Pointer position in window pixels, if it is over the window.
    pub mouse: Option<Point>,
    pub left_down: bool,
    /// Vertical wheel delta since the last poll.
    pub scroll_y: f64,
    /// False when the window lost focus.
    pub active: bool,
    /// Escape went down this poll.
    pub escape: bool,
}

#[derive(Clone, Copy, Debug)]
struct PinchTrack {
    scale: f64,
    last_scroll: Instant,
}

#[derive(Debug, Default)]
pub struct GestureRecognizer {
    was_down: bool,
    pinch: Option<PinchTrack>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any pinch in progress, reporting it as cancelled.
    pub fn cancel(&mut self) -> Option<FocusEvent> {
        self.pinch.take().map(|p| {
            log::trace!("pinch cancelled at x{:.3}", p.scale);
            FocusEvent::Pinch { scale: p.scale, phase: PinchPhase::Cancelled }
        })
    }

    /// Events produced by this poll, in order.
    pub fn feed(&mut self, sample: &InputSample) -> Vec<FocusEvent> {
        let mut events = Vec::new();

        // Visual: a click moves focus once; holding the button does nothing more.
        let pressed = sample.left_down && !self.was_down;
        self.was_down = sample.left_down;
        if pressed {
            if let Some(point) = sample.mouse {
                events.push(FocusEvent::Tap { point });
            }
        }

        // Focus loss or Escape abandons the pinch; radii stay where they got to.
        if !sample.active || sample.escape {
            events.extend(self.cancel());
            return events;
        }

        if sample.scroll_y != 0.0 {
            let factor = (sample.scroll_y * SCROLL_SENSITIVITY).exp();
            let (scale, phase) = match self.pinch {
                None => (factor, PinchPhase::Began),
                Some(p) => (p.scale * factor, PinchPhase::Changed),
            };
            // Keep scrolling past the limit and nothing grows any more.
            let scale = scale.clamp(MIN_PINCH_SCALE, MAX_PINCH_SCALE);
            self.pinch = Some(PinchTrack { scale, last_scroll: sample.now });
            log::trace!("pinch {phase:?} x{scale:.3}");
            events.push(FocusEvent::Pinch { scale, phase });
        } else if let Some(p) = self.pinch {
            if sample.now.duration_since(p.last_scroll) >= PINCH_IDLE {
                // Visual: wheel went quiet, so the blur re-renders. Next pinch starts from x1.
                self.pinch = None;
                log::trace!("pinch ended at x{:.3}", p.scale);
                events.push(FocusEvent::Pinch { scale: p.scale, phase: PinchPhase::Ended });
            }
        }

        events
    }
}
