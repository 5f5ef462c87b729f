// Browser tests for the JS bindings. Run with `wasm-pack test --headless --chrome`.
#![cfg(all(target_arch = "wasm32", feature = "serde_json"))]

use playground_core::WebPlayground;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn calculate_returns_json() {
    let mut pg = WebPlayground::new(None).unwrap();
    let json = pg.calculate(6.0, 3.0, "add").unwrap();
    assert!(json.contains("\"result\":9.0"), "{}", json);
}

#[wasm_bindgen_test]
fn divide_by_zero_rejects_with_code() {
    let mut pg = WebPlayground::new(None).unwrap();
    let err = pg.calculate(1.0, 0.0, "divide").unwrap_err();
    assert!(err.as_string().unwrap().starts_with("divide_by_zero:"));
}

#[wasm_bindgen_test]
fn partial_config_accepted() {
    let pg = WebPlayground::new(Some(r#"{"game":{"duration_ms":5000}}"#.into()));
    assert!(pg.is_ok());
    assert!(WebPlayground::new(Some("nope".into())).is_err());
}

#[wasm_bindgen_test]
fn game_state_round_trip() {
    let mut pg = WebPlayground::new(None).unwrap();
    assert!(pg.game_start());
    assert!(pg.game_catch());
    let state = pg.game_state().unwrap();
    assert!(state.contains("\"score\":10"), "{}", state);
}

#[wasm_bindgen_test]
fn negative_target_size_rejects_with_code() {
    let err = WebPlayground::new(Some(r#"{"game":{"target_size":-40}}"#.into())).err().unwrap();
    assert!(err.as_string().unwrap().starts_with("invalid_config:"));
}

#[wasm_bindgen_test]
fn scope_demo_returns_json() {
    let mut pg = WebPlayground::new(None).unwrap();
    let json = pg.demonstrate_scope().unwrap();
    assert!(json.contains("\"counter\":1"), "{}", json);
}
