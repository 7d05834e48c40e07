//! Perfect Circle core crate.
//!
//! The player drags a pointer across a canvas trying to trace a perfect
//! circle; the engine scores circularity live, rejects strokes that reverse
//! rotational direction, detects when the loop completes a full revolution
//! and keeps a persisted best score. All gameplay logic is host-testable
//! (`cargo test`); the `game` module is the browser-facing glue exposed to
//! JS through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod geometry;
pub mod scoring;
pub mod store;

mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start()
}
