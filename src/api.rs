use js_sys::Function;
use log::warn;
use wasm_bindgen::prelude::*;

use crate::ai::search::Yield;
use crate::config::SearchConfig;
use crate::game::{AlphaBetaSelector, GameInstance};
use crate::types::GameMode;

/// Browser handle around a [`GameInstance`] played by the alpha-beta AI.
#[wasm_bindgen]
pub struct ReversiGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `mode`: 0 = human plays Black, 1 = human plays White, 2 = two players.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: u8, level: u8, seed: u64) -> Result<ReversiGame, JsValue> {
        Self::build(mode, level, seed, SearchConfig::default())
    }

    /// Same as the constructor with search tunables; missing fields keep
    /// their defaults.
    pub fn with_config(
        mode: u8,
        level: u8,
        seed: u64,
        config: JsValue,
    ) -> Result<ReversiGame, JsValue> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Self::build(mode, level, seed, config)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }

    #[wasm_bindgen(getter)]
    pub fn is_cpu_turn(&self) -> bool {
        self.inner.is_cpu_turn()
    }

    /// Returns the number of flipped stones.
    pub fn place(&mut self, x: u8, y: u8) -> Result<u8, JsValue> {
        self.inner.place(x, y).map_err(to_js_error)
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.inner.pass().map_err(to_js_error)
    }

    /// Plays the computer's turn. `on_yield` is called between search slices;
    /// a truthy return (or a thrown error) cancels the search.
    pub fn ai_move(&mut self, on_yield: &Function) -> Result<JsValue, JsValue> {
        let mut host = || match on_yield.call0(&JsValue::NULL) {
            Ok(answer) if answer.is_truthy() => Yield::Cancel,
            Ok(_) => Yield::Continue,
            Err(err) => {
                warn!("yield callback threw, cancelling search: {err:?}");
                Yield::Cancel
            }
        };
        let turn = self.inner.ai_move(&mut host).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&turn)?)
    }

    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        self.inner.move_cursor(dx, dy);
    }

    pub fn place_at_cursor(&mut self) -> Result<u8, JsValue> {
        self.inner.place_at_cursor().map_err(to_js_error)
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.snapshot()
    }

    /// Rebuilds a game from [`ReversiGame::snapshot`] bytes.
    pub fn restore(data: &[u8], seed: u64) -> Result<ReversiGame, JsValue> {
        let selector = AlphaBetaSelector::new(SearchConfig::default(), seed);
        match GameInstance::from_snapshot(data, Box::new(selector)) {
            Ok(inner) => Ok(Self { inner }),
            Err(err) => {
                warn!("discarding resume record: {err}");
                Err(to_js_error(err))
            }
        }
    }
}

impl ReversiGame {
    fn build(mode: u8, level: u8, seed: u64, config: SearchConfig) -> Result<ReversiGame, JsValue> {
        let mode = GameMode::from_bits(mode)
            .ok_or_else(|| JsValue::from_str(&format!("invalid game mode: {mode}")))?;
        let selector = AlphaBetaSelector::new(config, seed);
        Ok(Self {
            inner: GameInstance::new(mode, level, Box::new(selector)),
        })
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
