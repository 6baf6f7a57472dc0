use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use js_sys::{Function, Object, Reflect};

use crate::board::BoardState;
use crate::error::OracleError;
use crate::interaction::{DropOutcome, Point};
use crate::oracle::MoveOracle;
use crate::render::RenderAdapter;
use crate::session::Session;
use crate::square::Square;

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Oracle backed by a JS object exposing `get_legal_actions`,
/// `get_best_move` and `get_state`, each `(encoded: string) => string`.
pub struct JsOracle {
    target: JsValue,
}

impl JsOracle {
    fn call(&self, name: &str, encoded: &str) -> Result<String, OracleError> {
        let func = method(&self.target, name).ok_or(OracleError::Unavailable)?;
        let reply = func
            .call1(&self.target, &JsValue::from_str(encoded))
            .map_err(|e| OracleError::Rejected(describe(&e)))?;
        reply
            .as_string()
            .ok_or_else(|| OracleError::Rejected(format!("{} returned a non-string", name)))
    }
}

impl MoveOracle for JsOracle {
    fn legal_actions(&self, encoded: &str) -> Result<String, OracleError> {
        self.call("get_legal_actions", encoded)
    }

    fn best_move(&self, encoded: &str) -> Result<String, OracleError> {
        self.call("get_best_move", encoded)
    }

    fn state(&self, encoded: &str) -> Result<String, OracleError> {
        self.call("get_state", encoded)
    }
}

/// View backed by a JS object. Every method is optional:
/// `render(encoded, cellSize)`, `raise(square)`, `float(square, x, y)`,
/// `settle(from, to)`. Squares are passed in algebraic form.
pub struct JsView {
    target: JsValue,
}

impl JsView {
    fn invoke(&self, name: &str, args: &[JsValue]) {
        let Some(func) = method(&self.target, name) else {
            return;
        };
        let args: js_sys::Array = args.iter().collect();
        if let Err(e) = func.apply(&self.target, &args) {
            web_sys::console::warn_1(&format!("view.{} failed: {}", name, describe(&e)).into());
        }
    }
}

impl RenderAdapter for JsView {
    fn render(&mut self, board: &BoardState, cell_size: f64) {
        self.invoke(
            "render",
            &[board.to_string().into(), JsValue::from_f64(cell_size)],
        );
    }

    fn raise(&mut self, square: Square) {
        self.invoke("raise", &[square.to_string().into()]);
    }

    fn float(&mut self, origin: Square, top_left: Point) {
        self.invoke(
            "float",
            &[
                origin.to_string().into(),
                JsValue::from_f64(top_left.x),
                JsValue::from_f64(top_left.y),
            ],
        );
    }

    fn settle(&mut self, origin: Square, target: Square) {
        self.invoke("settle", &[origin.to_string().into(), target.to_string().into()]);
    }
}

#[wasm_bindgen]
pub struct ChessBoard {
    inner: Session<JsOracle, JsView>,
}

#[wasm_bindgen]
impl ChessBoard {
    /// `oracle` and `view` are plain JS objects; see [`JsOracle`] and [`JsView`].
    #[wasm_bindgen(constructor)]
    pub fn new(oracle: JsValue, view: JsValue, cell_size: f64) -> Result<ChessBoard, JsValue> {
        console_error_panic_hook::set_once();

        let inner = Session::new(JsOracle { target: oracle }, JsView { target: view }, cell_size)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(ChessBoard { inner })
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Current board as the 70-character wire string.
    pub fn encoded(&self) -> String {
        self.inner.encoded().to_string()
    }

    /// Replace the board from a wire string. Throws on malformed input.
    pub fn load(&mut self, encoded: &str) -> Result<(), JsValue> {
        self.inner
            .load(encoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Call after the surface changed size.
    pub fn resize(&mut self, cell_size: f64) -> Result<(), JsValue> {
        self.inner
            .resize(cell_size)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the gesture id, or `undefined` if nothing was picked up.
    pub fn pointer_down(&mut self, file: u8, rank: u8, x: f64, y: f64) -> Option<f64> {
        let square = Square::new(file, rank)?;
        self.inner
            .pointer_down(square, Point::new(x, y))
            .map(|g| g as f64)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y)).is_some()
    }

    /// Returns `{ gesture, from, to, noop, encoded, reply?, error? }` or
    /// `undefined` when no drag was active.
    pub fn pointer_up(&mut self) -> JsValue {
        match self.inner.pointer_up() {
            Some(outcome) => {
                web_sys::console::log_1(&outcome.encoded.as_str().into());
                drop_to_js(&outcome)
            }
            None => JsValue::UNDEFINED,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.inner.cancel().is_some()
    }

    /// Whether a reply for `gesture` is still current.
    pub fn is_current(&self, gesture: f64) -> bool {
        self.inner.accept(gesture as u64, ()).is_some()
    }

    pub fn best_move(&self) -> Result<String, JsValue> {
        self.inner
            .best_move()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn state(&self) -> Result<String, JsValue> {
        self.inner
            .derived_state()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn drop_to_js(outcome: &DropOutcome) -> JsValue {
    let obj = Object::new();
    let set = |key: &str, value: JsValue| {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), &value);
    };
    set("gesture", JsValue::from_f64(outcome.gesture as f64));
    set("from", outcome.from.to_string().into());
    set("to", outcome.to.to_string().into());
    set("noop", JsValue::from_bool(outcome.is_noop()));
    set("encoded", outcome.encoded.as_str().into());
    match &outcome.reply {
        Ok(reply) => {
            web_sys::console::log_1(&reply.as_str().into());
            set("reply", reply.as_str().into());
        }
        Err(err) => set("error", err.to_string().into()),
    }
    obj.into()
}
