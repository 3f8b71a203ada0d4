//! Heartburst entry point
//!
//! On the web the page is wired up by `heartburst::web`. Natively there is no
//! window, so this plays a short deterministic show into a command buffer and
//! reports what it drew.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    heartburst::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heartburst::{CommandBuffer, FireworksShow, ShowConfig};

    const FRAMES: u32 = 600;
    const FRAME_MS: f64 = 16.0;

    env_logger::init();
    log::info!("Heartburst (native) starting...");
    log::info!("Native mode renders headless - run with `trunk serve` for the real page");

    let mut show = FireworksShow::new(
        CommandBuffer::new(1280.0, 720.0),
        &ShowConfig::default(),
        2004,
    );
    show.start();

    let mut launched = 0;
    let mut peak_live = 0;
    let mut discs = 0;
    for frame in 0..FRAMES {
        launched += show.tick(1_000.0 + frame as f64 * FRAME_MS);
        peak_live = peak_live.max(show.fireworks().len());
        if let Some(surface) = show.surface_mut() {
            discs += surface.circle_count();
            surface.clear();
        }
    }

    log::info!(
        "{} frames: {} fireworks launched, {} live at peak, {} discs drawn",
        FRAMES,
        launched,
        peak_live,
        discs
    );
    show.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
