//! WASM bindings for gammon-core
//!
//! Provides a JavaScript-friendly API over the board and play enumeration.

use wasm_bindgen::prelude::*;

use crate::{parse_play, Board, CheckerPlay, Move, Roll, RollApplier, Variant};

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
    applier: RollApplier,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Starting position of a variant ("standard", "half" or "mini")
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<WasmBoard, JsError> {
        let variant: Variant = variant.parse()?;
        Ok(WasmBoard {
            inner: Board::starting(variant),
            applier: RollApplier::STANDARD,
        })
    }

    /// Create board from a flat layout (index 0 = own bar, last = opponent bar)
    #[wasm_bindgen(js_name = fromPoints)]
    pub fn from_points(variant: &str, points: Vec<i8>) -> Result<WasmBoard, JsError> {
        let variant: Variant = variant.parse()?;
        Ok(WasmBoard {
            inner: Board::new(variant.geometry(), &points)?,
            applier: RollApplier::STANDARD,
        })
    }

    /// Play doublets twice instead of four times
    #[wasm_bindgen(js_name = disableDoubletBonus)]
    pub fn disable_doublet_bonus(&mut self) {
        self.applier = RollApplier::doublet_disabled();
    }

    /// Flat layout seen from the player to move
    pub fn points(&self) -> Vec<i8> {
        self.inner.points().to_vec()
    }

    #[wasm_bindgen(js_name = mayBearOff)]
    pub fn may_bear_off(&self) -> bool {
        self.inner.may_bear_off()
    }

    #[wasm_bindgen(js_name = pipCount)]
    pub fn pip_count(&self) -> u32 {
        self.inner.pip_count()
    }

    /// Checkers borne off as [own, opponent]
    #[wasm_bindgen(js_name = borneOff)]
    pub fn borne_off(&self) -> Vec<u8> {
        vec![
            self.inner.own_borne_off() as u8,
            self.inner.opponent_borne_off() as u8,
        ]
    }

    /// The same position from the opponent's side
    pub fn revert(&self) -> WasmBoard {
        WasmBoard {
            inner: self.inner.revert(),
            applier: self.applier,
        }
    }

    /// Get legal plays as JSON array
    /// Each play is { notation: "21: 24/23 13/11", moves: [...] }
    #[wasm_bindgen(js_name = legalPlays)]
    pub fn legal_plays(&self, d1: u8, d2: u8) -> Result<JsValue, JsError> {
        let roll = Roll::try_new(d1, d2)?;
        let bear_off = self.inner.bear_off_index();
        let plays: Vec<WasmPlay> = self
            .applier
            .legal_plays(&self.inner, roll)
            .iter()
            .map(|play| WasmPlay {
                notation: play.to_descending_string(bear_off),
                moves: play.moves().to_vec(),
            })
            .collect();
        Ok(serde_wasm_bindgen::to_value(&plays)?)
    }

    /// Apply a play written in notation, e.g. "21: 13/11 6/5".
    /// Returns false (board unchanged) if it is not one of the legal plays.
    #[wasm_bindgen(js_name = applyPlay)]
    pub fn apply_play(&mut self, text: &str) -> Result<bool, JsError> {
        let play = parse_play(text, &self.inner.geometry())?;
        let wanted = sorted_moves(&play);
        let matching = self
            .applier
            .legal_plays(&self.inner, play.roll())
            .into_iter()
            .find(|candidate| sorted_moves(candidate) == wanted);
        let Some(legal) = matching else {
            return Ok(false);
        };
        self.inner = self.inner.apply_play(&legal);
        Ok(true)
    }

    /// Clone the board
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_board(&self) -> WasmBoard {
        WasmBoard {
            inner: self.inner,
            applier: self.applier,
        }
    }
}

/// Move order within a play does not change the resulting position.
fn sorted_moves(play: &CheckerPlay) -> Vec<Move> {
    let mut moves = play.moves().to_vec();
    moves.sort_unstable();
    moves
}

/// Serializable play for JavaScript
#[derive(serde::Serialize)]
struct WasmPlay {
    notation: String,
    moves: Vec<Move>,
}
