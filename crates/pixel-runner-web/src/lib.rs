//! Browser bridge for the pixel-runner simulation.
//!
//! The host page calls `game_init` once, then `game_frame(performance.now())` from its
//! `requestAnimationFrame` loop. After each frame it reads the draw list (JSON or the
//! tessellated vertex buffer), the HUD snapshot and the sound event buffer.

pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use pixel_runner::{GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

fn today() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

/// Create the runner. `config_json` may be empty or a partial `GameConfig`.
#[wasm_bindgen]
pub fn game_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        GameConfig::default()
    } else {
        GameConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("invalid config, using defaults: {}", e);
            GameConfig::default()
        })
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new(config));
    });
    log::info!("pixel-runner: initialized");
}

#[wasm_bindgen]
pub fn game_frame(now_ms: f64) {
    with_runner(|r| r.frame(now_ms, today));
}

// ---- Session control ----

#[wasm_bindgen]
pub fn game_start(now_ms: f64) {
    with_runner(|r| r.start(now_ms));
}

#[wasm_bindgen]
pub fn game_pause() {
    with_runner(|r| r.pause());
}

#[wasm_bindgen]
pub fn game_resume(now_ms: f64) {
    with_runner(|r| r.resume(now_ms));
}

#[wasm_bindgen]
pub fn game_restart(now_ms: f64) {
    with_runner(|r| r.restart(now_ms));
}

#[wasm_bindgen]
pub fn game_menu() {
    with_runner(|r| r.menu());
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Touch controls: joystick axis, jump/shoot buttons and weapon slots.
#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a }));
}

// ---- Assets and persistence ----

#[wasm_bindgen]
pub fn game_load_manifest(json: &str) -> bool {
    with_runner(|r| r.load_manifest(json))
}

#[wasm_bindgen]
pub fn game_mark_asset_ready(name: &str) -> bool {
    with_runner(|r| r.mark_asset_ready(name))
}

#[wasm_bindgen]
pub fn game_load_high_scores(json: &str) -> bool {
    with_runner(|r| r.load_high_scores(json))
}

#[wasm_bindgen]
pub fn get_high_scores() -> String {
    with_runner(|r| r.high_scores_json())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_draw_commands() -> String {
    with_runner(|r| r.draw_commands_json())
}

#[wasm_bindgen]
pub fn get_hud() -> String {
    with_runner(|r| r.hud_json())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count())
}
