//! `requestAnimationFrame` driver

use game_core::{CancelToken, Tick};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls a frame function once per animation frame until it returns
/// `Tick::Stop` or the token is cancelled
pub struct FrameLoop {
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    // Keeps the closure alive while frames are scheduled
    _callback: FrameCallback,
}

impl FrameLoop {
    pub fn start<F>(token: CancelToken, mut frame: F) -> Result<Self, JsValue>
    where
        F: FnMut() -> Tick + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let weak: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::downgrade(&callback);
        let loop_token = token.clone();
        let loop_pending = pending.clone();
        *callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            loop_pending.set(None);
            if loop_token.is_cancelled() || frame() == Tick::Stop {
                return;
            }
            // The frame itself may have cancelled
            if loop_token.is_cancelled() {
                return;
            }
            let Some(callback) = weak.upgrade() else {
                return;
            };
            match request_frame(&callback) {
                Ok(id) => loop_pending.set(Some(id)),
                Err(e) => web_sys::console::error_2(&"Failed to schedule frame:".into(), &e),
            }
        }));

        pending.set(Some(request_frame(&callback)?));

        Ok(Self {
            token,
            pending,
            _callback: callback,
        })
    }

    /// Stop the loop and drop any frame already requested
    pub fn cancel(&self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let callback = callback.borrow();
    let closure = callback
        .as_ref()
        .ok_or_else(|| JsValue::from_str("Frame callback missing"))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}
