//! Playground core crate.
//!
//! The computational side of the interactive playground page: calculator, text,
//! array and colour engines, the catch-the-target game, the loading indicator
//! and the stats counters. The page script owns the DOM and calls in through
//! [`WebPlayground`] (or [`Playground`] directly from Rust); timers are driven
//! by the host calling `poll(now)`.

use wasm_bindgen::prelude::*;

mod animation;
mod config;
mod error;
mod game;
mod loading;
mod playground;
mod stats;
mod timer;

pub mod engine;

#[cfg(feature = "serde_json")]
mod web;

pub use animation::{AnimationKind, DEFAULT_ANIMATION_MS, animation_duration};
pub use config::{ArrayDefaults, PlaygroundConfig};
pub use engine::{Calculation, ColorSample, MathOp, TextCounts, TextOp, TextResult};
pub use error::{PlaygroundError, Result};
pub use game::{Bounds, GameConfig, GameController, GameEvent, GameSnapshot, MAX_CATCH_UP_MOVES, POINTS_PER_CATCH, Position};
pub use loading::{LoadingConfig, LoadingEvent, LoadingKind, LoadingPhase, LoadingSession, LoadingSnapshot};
pub use playground::{ArraySummary, Playground, PlaygroundEvent, ScopeReport};
pub use stats::{StatsCounter, StatsProgress, StatsSnapshot};
pub use timer::TimerSlot;
#[cfg(feature = "serde_json")]
pub use web::WebPlayground;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Host clock for the JS bindings; 0 outside a browser.
#[cfg(feature = "serde_json")]
fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
