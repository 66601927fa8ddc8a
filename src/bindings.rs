//! JavaScript entry points for hosts that paint the board themselves.
//!
//! ```js
//! const game = new NumberRush();
//! game.onChange(snapshot => paint(snapshot));
//! game.configureFromText(input.value);
//! game.start();
//! ```

use log::warn;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{Game, Snapshot};
use crate::scheduler::BrowserScheduler;

fn snapshot_to_js(snapshot: &Snapshot) -> JsValue {
    serde_wasm_bindgen::to_value(snapshot).unwrap_or_else(|e| {
        warn!("Failed to serialize snapshot: {}", e);
        JsValue::NULL
    })
}

#[wasm_bindgen]
pub struct NumberRush {
    game: Game<BrowserScheduler>,
}

impl Default for NumberRush {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl NumberRush {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NumberRush {
        NumberRush {
            game: Game::new(BrowserScheduler),
        }
    }

    pub fn configure(&self, count: u32) {
        self.game.configure(GameConfig { count });
    }

    /// Settings for the next round, as `{ count }`.
    pub fn config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.game.config()).unwrap_or_else(|e| {
            warn!("Failed to serialize config: {}", e);
            JsValue::NULL
        })
    }

    /// Validate raw input text and apply it. Rejects with the validation message.
    #[wasm_bindgen(js_name = configureFromText)]
    pub fn configure_from_text(&self, text: &str) -> Result<u32, JsValue> {
        let config = GameConfig::from_input(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.game.configure(config);
        Ok(config.count)
    }

    pub fn start(&self) {
        self.game.start();
    }

    pub fn reset(&self) {
        self.game.reset();
    }

    pub fn click(&self, number: u32) {
        self.game.click(number);
    }

    pub fn snapshot(&self) -> JsValue {
        snapshot_to_js(&self.game.snapshot())
    }

    /// Register `callback(snapshot)`; it runs after every state change.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.game.subscribe(move |snapshot| {
            if let Err(e) = callback.call1(&JsValue::NULL, &snapshot_to_js(&snapshot)) {
                warn!("onChange callback threw: {:?}", e);
            }
        });
    }
}
