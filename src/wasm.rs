//! Bindings for driving a stage from JavaScript.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::grid::Position;
use crate::layout::placements;
use crate::stage::{Stage, StageDefinition};

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A [`Stage`] exposed to JavaScript.
#[wasm_bindgen]
pub struct JsStage {
    stage: Stage,
}

#[wasm_bindgen]
impl JsStage {
    /// Load a stage from the JSON encoding of one stage definition.
    #[wasm_bindgen(constructor)]
    pub fn new(definition_json: &str) -> Result<JsStage, JsValue> {
        let definition: StageDefinition = serde_json::from_str(definition_json).map_err(to_js_error)?;
        Ok(Self { stage: Stage::new(definition).map_err(to_js_error)? })
    }

    /// Number of tiles.
    pub fn size(&self) -> usize {
        self.stage.board().size()
    }

    /// Press a tile and count the move.
    pub fn press(&mut self, index: usize) -> Result<(), JsValue> {
        self.stage.press(index).map_err(to_js_error)
    }

    /// Whether the board shows the target.
    #[wasm_bindgen(js_name = isCleared)]
    pub fn is_cleared(&self) -> bool {
        self.stage.is_cleared()
    }

    /// Moves made so far.
    pub fn moves(&self) -> u32 {
        self.stage.moves()
    }

    /// Stars earned with the moves made so far.
    pub fn rating(&self) -> u8 {
        self.stage.rating()
    }

    /// Start over from the initial faces.
    pub fn retry(&mut self) {
        self.stage.retry()
    }

    /// Live faces as `0`/`1` characters, tile 0 first.
    #[wasm_bindgen(js_name = stateString)]
    pub fn state_string(&self) -> String {
        self.stage.board().state_string()
    }

    /// Neighbor indices of a tile, `-1` for none, in right/left/base order.
    pub fn neighbors(&self, index: usize) -> Result<Array, JsValue> {
        let tile = self.stage.board().tile(index).ok_or_else(|| JsValue::from_str("tile index out of range"))?;
        Ok(tile.neighbors.iter()
            .map(|neighbor| JsValue::from_f64(neighbor.map_or(-1., |n| n as f64)))
            .collect())
    }

    /// One `{index, upward, front, scale, x, y}` object per tile, fitted into a rectangle centred on the origin.
    pub fn placements(&self, max_width: f64, max_height: f64) -> Result<Array, JsValue> {
        let matrix = self.stage.definition().initial_matrix().map_err(to_js_error)?;
        placements(&matrix, Position::default(), max_width, max_height)
            .into_iter()
            .map(|placement| -> Result<JsValue, JsValue> {
                let object = Object::new();
                Reflect::set(&object, &"index".into(), &JsValue::from_f64(placement.index as f64))?;
                Reflect::set(&object, &"upward".into(), &placement.orientation.is_upward().into())?;
                Reflect::set(&object, &"front".into(), &placement.front.into())?;
                Reflect::set(&object, &"scale".into(), &placement.scale.into())?;
                Reflect::set(&object, &"x".into(), &placement.position.x.into())?;
                Reflect::set(&object, &"y".into(), &placement.position.y.into())?;
                Ok(JsValue::from(object))
            })
            .collect()
    }
}
