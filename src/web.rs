//! Browser bindings
//!
//! The page owns the canvas, the pointer and the frame loop; it forwards
//! input here and draws whatever `frame()` returns.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::highscores::{LocalStorageScoreStore, ScoreReporter};
use crate::settings::Settings;
use crate::sim::{Aim, GameState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bubble Pop starting");
}

/// Game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
    reporter: ScoreReporter<LocalStorageScoreStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let mut reporter = ScoreReporter::new(LocalStorageScoreStore);
        reporter.refresh();
        WebGame {
            state: GameState::with_tuning(seed, settings.tuning),
            input: TickInput::default(),
            reporter,
        }
    }

    /// Pointer moved (canvas coordinates)
    pub fn aim_at(&mut self, x: f32, y: f32) {
        self.input.aim = Some(Aim::Point(Vec2::new(x, y)));
    }

    /// Click
    pub fn fire(&mut self) {
        self.input.fire = true;
    }

    /// "New game" button
    pub fn reset(&mut self) {
        self.input.reset = true;
    }

    /// Run one tick and return the render snapshot as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let input = std::mem::take(&mut self.input);
        let snapshot = tick(&mut self.state, &input);
        self.reporter.observe(&snapshot.events);
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    /// Last known high score, or -1 when it could not be loaded
    pub fn high_score(&self) -> f64 {
        self.reporter.high_score().map_or(-1.0, |s| s as f64)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
