//! JS bindings.
//!
//! `WebPlayground` wraps [`Playground`] for the page script: it reads the clock
//! from `performance.now()`, hands structured records back as JSON strings and
//! rejects with `"<code>: <message>"` so the script can branch on the code.
//! All DOM work stays on the JS side.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::Bounds;
use crate::{Playground, PlaygroundConfig, PlaygroundError, performance_now};

fn reject(err: PlaygroundError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.code(), err))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("serialization: {e}")))
}

#[wasm_bindgen]
pub struct WebPlayground {
    inner: Playground,
}

#[wasm_bindgen]
impl WebPlayground {
    /// `config_json` may be omitted or partial; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebPlayground, JsValue> {
        let config = match config_json {
            Some(json) => PlaygroundConfig::from_json(&json).map_err(reject)?,
            None => PlaygroundConfig::default(),
        };
        let inner = Playground::new(config, performance_now()).map_err(reject)?;
        Ok(WebPlayground { inner })
    }

    /// `{ a, b, op, result }`
    pub fn calculate(&mut self, a: f64, b: f64, op: &str) -> Result<String, JsValue> {
        let calc = self.inner.calculate(a, b, op).map_err(reject)?;
        to_json(&calc)
    }

    pub fn process_text(&mut self, text: &str, op: &str) -> Result<String, JsValue> {
        let result = self.inner.process_text(text, op).map_err(reject)?;
        to_json(&result)
    }

    pub fn generate_color(&mut self) -> Result<String, JsValue> {
        to_json(&self.inner.generate_color())
    }

    pub fn array_generate(&mut self) -> Result<Vec<i32>, JsValue> {
        self.inner.array_generate().map(<[i32]>::to_vec).map_err(reject)
    }

    pub fn array_sort(&mut self) -> Result<Vec<i32>, JsValue> {
        self.inner.array_sort().map(<[i32]>::to_vec).map_err(reject)
    }

    pub fn array_reverse(&mut self) -> Result<Vec<i32>, JsValue> {
        self.inner.array_reverse().map(<[i32]>::to_vec).map_err(reject)
    }

    /// `{ sum, average }`
    pub fn array_sum(&mut self) -> Result<String, JsValue> {
        let summary = self.inner.array_sum().map_err(reject)?;
        to_json(&summary)
    }

    /// Returns the animation's duration in milliseconds.
    pub fn trigger_animation(&mut self, name: &str) -> u32 {
        self.inner.trigger_animation(name)
    }

    pub fn reset_animations(&mut self) {
        self.inner.reset_animations();
    }

    pub fn flip_card(&mut self, card: &str) -> bool {
        self.inner.flip_card(card)
    }

    pub fn show_modal(&mut self, animation: &str) {
        self.inner.show_modal(animation);
    }

    pub fn close_modal(&mut self) {
        self.inner.close_modal();
    }

    /// For buttons without a dedicated handler.
    pub fn record_click(&mut self) {
        self.inner.record_click();
    }

    /// Returns `{ counter, message, local_random }`.
    pub fn demonstrate_scope(&mut self) -> Result<String, JsValue> {
        to_json(&self.inner.demonstrate_scope())
    }

    pub fn game_start(&mut self) -> bool {
        self.inner.game_start(performance_now())
    }

    pub fn game_catch(&mut self) -> bool {
        self.inner.game_catch()
    }

    /// Move the target inside a `width` x `height` area; returns `{ x, y }`.
    pub fn game_tick(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let pos = self.inner.game_tick(Bounds { width, height }).map_err(reject)?;
        to_json(&pos)
    }

    pub fn game_set_bounds(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.game_set_bounds(Bounds { width, height }).map_err(reject)
    }

    pub fn game_stop(&mut self) -> bool {
        self.inner.game_stop()
    }

    pub fn game_reset(&mut self) {
        self.inner.game_reset();
    }

    pub fn game_state(&self) -> Result<String, JsValue> {
        to_json(&self.inner.game(performance_now()))
    }

    pub fn loading_start(&mut self, kind: &str, duration_ms: f64) -> Result<(), JsValue> {
        self.inner.loading_start(kind, duration_ms, performance_now()).map_err(reject)
    }

    pub fn loading_stop(&mut self) {
        self.inner.loading_stop(performance_now());
    }

    pub fn loading_state(&self) -> Result<String, JsValue> {
        to_json(&self.inner.loading(performance_now()))
    }

    pub fn stats(&self) -> Result<String, JsValue> {
        to_json(&self.inner.stats(performance_now()))
    }

    /// Fire due timers; returns a JSON array of events. Call from a JS interval
    /// or animation frame.
    pub fn poll(&mut self) -> Result<String, JsValue> {
        let events = self.inner.poll(performance_now());
        to_json(&events)
    }
}
