// What you SEE:
// • The photo, sharp around the focus point and increasingly blurred outward.
// • Click: moves the focus point there.
// • Scroll wheel: grows/shrinks the sharp area; the blur re-renders when you stop.
// • Yellow ring = edge of the sharp area, blue ring = where full blur starts.
// • ESC mid-scroll: stops resizing and renders at the current size. ESC otherwise quits.

mod config;
mod draw;
mod error;
mod focus;
mod gamma;
mod gesture;
mod layout;
mod mapping;
mod render;
mod source;
mod types;
mod vision;

use std::time::Instant;

use clap::Parser;
use config::Args;
use draw::{draw_focus_overlay, draw_text_5x7, status_line, window_size, Drawer};
use error::Error;
use focus::{FocusController, FocusEvent, PinchPhase};
use gesture::GestureRecognizer;
use layout::compose_into;
use mapping::ContentPlacement;
use render::MaskedBlurRenderer;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    /* --- Photo + window setup --- */
    let photo = source::load_frame(&args.image)?;
    let title = format!("Selective Focus - {}", args.image.display());
    let mut drawer = Drawer::new(&title, args.width, args.height)?;
    log::info!("fit mode {}, blur power {}", args.fit_mode, args.blur_power);

    let mut controller = FocusController::new(
        photo,
        MaskedBlurRenderer::new(),
        window_size(drawer.size()),
        args.fit_mode,
        args.blur_power,
    );
    controller.render_initial();

    let mut gestures = GestureRecognizer::new();
    let (w, h) = drawer.size();
    let mut screen = FrameBuffer::new(w, h);
    let mut dirty = true; // recompose only when something changed

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        // 1) Follow window resizes; taps map against the new size from now on.
        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) {
            screen = FrameBuffer::new(w, h);
            controller.resize(window_size((w, h)));
            dirty = true;
        }

        // 2) Input -> focus events -> (maybe) re-render.
        //    Visual: rings follow the wheel live; the blur catches up on release.
        let sample = drawer.sample(Instant::now());
        let events = gestures.feed(&sample);
        let cancelled = events
            .iter()
            .any(|e| matches!(e, FocusEvent::Pinch { phase: PinchPhase::Cancelled, .. }));
        for event in events {
            controller.handle(event);
            dirty = true;
        }
        if sample.escape && !cancelled {
            break;
        }

        // 3) Photo, rings, status line.
        //    Visual: letterbox bars in BACKGROUND, rings on top, text last so it stays readable.
        if dirty {
            let viewport = *controller.viewport();
            compose_into(&mut screen, controller.displayed(), viewport.fit_mode);
            let region = controller.state().region();
            if let Some(placement) = ContentPlacement::resolve(viewport.container, viewport.content, viewport.fit_mode) {
                draw_focus_overlay(&mut screen, &region, &placement);
            }
            draw_text_5x7(&mut screen, 8, 8, &status_line(controller.state(), controller.blur_power()), 0x00_FF_FF_FF);
            dirty = false;
        }

        // 4) Present (also pumps window events for the next poll).
        if screen.pixels.is_empty() {
            drawer.pump();
        } else {
            drawer.present(&screen)?;
        }
    }

    Ok(())
}
