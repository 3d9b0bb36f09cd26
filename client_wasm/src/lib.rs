//! Canvas 2D client for single-player Pong
//!
//! Hosts the `GameController` in the page: pointer listeners feed the player
//! paddle, `requestAnimationFrame` drives frames, and each frame's display
//! list is replayed on the canvas. The page's menu and game-over overlay
//! follow the state names reported to the listener set by JavaScript.

mod canvas;
mod frame_loop;
mod input;
mod probe;

use frame_loop::FrameLoop;
use game_core::*;
use input::PointerInput;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

/// Main client state
struct Client {
    controller: GameController,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    input: Option<PointerInput>,
    frame_loop: Option<FrameLoop>,
    state_listener: Option<js_sys::Function>,
}

/// Pending call to the JavaScript state listener
///
/// Made after the client borrow is released so the listener may call back in.
struct StateChange {
    listener: js_sys::Function,
    state: &'static str,
    winner: Option<&'static str>,
}

impl StateChange {
    fn dispatch(self) {
        let winner = self.winner.map(JsValue::from_str).unwrap_or(JsValue::NULL);
        if let Err(e) = self
            .listener
            .call2(&JsValue::NULL, &JsValue::from_str(self.state), &winner)
        {
            console::error_2(&"State listener failed:".into(), &e);
        }
    }
}

impl Client {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(Params::FIELD_WIDTH as u32);
        canvas.set_height(Params::FIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            controller: GameController::new(),
            canvas,
            ctx,
            input: None,
            frame_loop: None,
            state_listener: None,
        })
    }

    fn state_change(&self) -> Option<StateChange> {
        let listener = self.state_listener.clone()?;
        Some(StateChange {
            listener,
            state: self.controller.state().name(),
            winner: self.controller.winner().map(Side::name),
        })
    }

    fn start_game(&mut self) -> Result<(), JsValue> {
        let seed = js_sys::Date::now() as u64;
        let token = self.controller.start_game(seed).map_err(|e| JsValue::from_str(&e))?;
        let field_height = self
            .controller
            .session()
            .map(|s| s.config.field_height)
            .unwrap_or(Params::FIELD_HEIGHT);

        let attached = PointerInput::attach(&self.canvas, field_height, on_pointer)
            .and_then(|input| Ok((input, FrameLoop::start(token, on_frame)?)));
        match attached {
            Ok((input, frame_loop)) => {
                self.input = Some(input);
                self.frame_loop = Some(frame_loop);
                console::log_1(
                    &format!("Match started on {}", self.controller.difficulty()).into(),
                );
                Ok(())
            }
            Err(e) => {
                self.controller.return_to_menu();
                Err(e)
            }
        }
    }

    fn frame(&mut self) -> Tick {
        let tick = self.controller.frame();
        match tick {
            Tick::Continue => {
                if let Some(cmds) = self.controller.draw_list() {
                    if let Err(e) = canvas::draw(&self.ctx, &cmds) {
                        console::error_2(&"Draw failed:".into(), &e);
                    }
                }
            }
            Tick::Stop => {
                self.input = None;
                if let Some(winner) = self.controller.winner() {
                    console::log_1(&format!("{} wins", winner.name()).into());
                }
            }
        }
        tick
    }

    fn return_to_menu(&mut self) -> bool {
        let result = self.controller.return_to_menu();
        if result.success {
            self.frame_loop = None;
            self.input = None;
        }
        result.success
    }
}

thread_local! {
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<R>(f: impl FnOnce(&mut Client) -> Result<R, JsValue>) -> Result<R, JsValue> {
    CLIENT.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Client busy"))?;
        let client = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Client not initialized"))?;
        f(client)
    })
}

fn on_pointer(field_y: f32) {
    let _ = with_client(|client| {
        let target = client
            .controller
            .session()
            .map(|s| s.config.pointer_target_y(field_y));
        if let Some(y) = target {
            client.controller.pointer_moved(y);
        }
        Ok(())
    });
}

fn on_frame() -> Tick {
    let result = with_client(|client| {
        let tick = client.frame();
        let change = match tick {
            Tick::Stop => client.state_change(),
            Tick::Continue => None,
        };
        Ok((tick, change))
    });
    match result {
        Ok((tick, change)) => {
            if let Some(change) = change {
                change.dispatch();
            }
            tick
        }
        Err(e) => {
            console::error_2(&"Frame failed:".into(), &e);
            Tick::Stop
        }
    }
}

#[wasm_bindgen]
pub fn init_game(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let client = Client::new(canvas)?;
    CLIENT.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Client busy"))?;
        *slot = Some(client);
        Ok::<_, JsValue>(())
    })?;
    console::log_1(&"Pong client ready".into());
    Ok(())
}

/// Display names of the difficulty tiers, in index order
#[wasm_bindgen]
pub fn difficulty_names() -> js_sys::Array {
    Difficulty::ALL
        .iter()
        .map(|d| JsValue::from_str(d.name()))
        .collect()
}

#[wasm_bindgen]
pub fn selected_difficulty() -> Result<u8, JsValue> {
    with_client(|client| Ok(client.controller.difficulty().index()))
}

/// Select the tier for the next match; returns false while a match is running
#[wasm_bindgen]
pub fn select_difficulty(index: u8) -> Result<bool, JsValue> {
    let difficulty = Difficulty::from_index(index).map_err(|e| JsValue::from_str(&e))?;
    with_client(|client| Ok(client.controller.select_difficulty(difficulty)))
}

#[wasm_bindgen]
pub fn game_state() -> Result<String, JsValue> {
    with_client(|client| Ok(client.controller.state().name().to_string()))
}

/// Register `listener(state, winner)`, called on every state change
#[wasm_bindgen]
pub fn set_state_listener(listener: js_sys::Function) -> Result<(), JsValue> {
    with_client(|client| {
        client.state_listener = Some(listener);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let change = with_client(|client| {
        client.start_game()?;
        Ok(client.state_change())
    })?;
    if let Some(change) = change {
        change.dispatch();
    }
    Ok(())
}

#[wasm_bindgen]
pub fn return_to_menu() -> Result<bool, JsValue> {
    let (left, change) = with_client(|client| {
        let left = client.return_to_menu();
        Ok((left, client.state_change().filter(|_| left)))
    })?;
    if let Some(change) = change {
        change.dispatch();
    }
    Ok(left)
}

/// Ping the backend under `base`; resolves to its message, or "" on failure
#[wasm_bindgen]
pub fn probe_backend(base: String) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        match probe::fetch_ping(&base).await {
            Ok(message) => Ok(JsValue::from_str(&message)),
            Err(e) => {
                console::error_2(&"Backend probe failed:".into(), &e);
                Ok(JsValue::from_str(""))
            }
        }
    })
}
