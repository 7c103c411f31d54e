//! Browser bridge
//!
//! The JS presentation layer owns rendering, input polling, and scenes. It
//! drives a [`WebGame`] once per animation frame and reads back JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::FrameStepper;
use crate::hud::HudSnapshot;
use crate::sim::{GameState, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialized");
    }
    log::info!("Munch starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
    stepper: FrameStepper,
}

impl WebGame {
    fn from_state(state: GameState) -> WebGame {
        WebGame {
            state,
            input: TickInput::default(),
            stepper: FrameStepper::new(),
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session with the reference balance
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        Self::from_state(GameState::new(u64::from(seed)))
    }

    /// Start a session with a JSON tuning document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u32, tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_state(GameState::with_tuning(u64::from(seed), tuning)))
    }

    /// Movement intent from the input layer (sign per axis)
    #[wasm_bindgen(js_name = setMove)]
    pub fn set_move(&mut self, x: f32, y: f32) {
        self.input.move_dir = Vec2::new(x, y);
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    #[wasm_bindgen(js_name = setIdleMode)]
    pub fn set_idle_mode(&mut self, on: bool) {
        self.input.idle_mode = on;
        log::info!("Idle mode: {}", on);
    }

    /// Advance by one animation frame (seconds since the last frame)
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.stepper.advance(&mut self.state, &mut self.input, frame_dt)
    }

    pub fn score(&self) -> f64 {
        self.state.score.total_score as f64
    }

    #[wasm_bindgen(js_name = elapsedSeconds)]
    pub fn elapsed_seconds(&self) -> u32 {
        self.state.score.elapsed_whole_secs()
    }

    #[wasm_bindgen(js_name = isEnded)]
    pub fn is_ended(&self) -> bool {
        self.state.outcome.is_some()
    }

    #[wasm_bindgen(js_name = hudJson)]
    pub fn hud_json(&self) -> String {
        to_json(&HudSnapshot::from_state(&self.state))
    }

    /// Pending events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> String {
        to_json(&self.state.drain_events())
    }

    /// `{final_score, elapsed_seconds, stars_awarded}` once the level is won
    #[wasm_bindgen(js_name = outcomeJson)]
    pub fn outcome_json(&self) -> Option<String> {
        self.state.outcome.as_ref().map(to_json)
    }

    /// Player, items, and hazards for the renderer
    #[wasm_bindgen(js_name = entitiesJson)]
    pub fn entities_json(&self) -> String {
        let view = serde_json::json!({
            "player": {
                "pos": self.state.player.pos,
                "facing": self.state.player.facing,
                "size": self.state.player_size(),
                "mouth": self.state.mouth_position(),
            },
            "items": self.state.items,
            "hazards": self.state.hazards,
        });
        view.to_string()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Serialization failed: {}", e);
        "null".to_string()
    })
}
