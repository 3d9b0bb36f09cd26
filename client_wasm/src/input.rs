//! Pointer input: mouse and touch position over the canvas

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Map a viewport Y coordinate into field units
///
/// The canvas may be scaled by CSS, so the offset from its top edge is
/// stretched by the ratio of field height to displayed height.
pub fn to_field_y(client_y: f64, rect_top: f64, rect_height: f64, field_height: f32) -> f32 {
    let local = client_y - rect_top;
    if rect_height <= 0.0 {
        return local as f32;
    }
    (local * field_height as f64 / rect_height) as f32
}

/// Mouse and touch listeners on the canvas, removed on drop
pub struct PointerInput {
    canvas: HtmlCanvasElement,
    on_mouse: Closure<dyn FnMut(MouseEvent)>,
    on_touch: Closure<dyn FnMut(TouchEvent)>,
}

impl PointerInput {
    /// Attach listeners that report the pointer's field Y to `on_move`
    pub fn attach<F>(canvas: &HtmlCanvasElement, field_height: f32, on_move: F) -> Result<Self, JsValue>
    where
        F: Fn(f32) + 'static,
    {
        let on_move = Rc::new(on_move);

        let on_mouse = {
            let canvas = canvas.clone();
            let on_move = on_move.clone();
            Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                on_move(to_field_y(
                    event.client_y() as f64,
                    rect.top(),
                    rect.height(),
                    field_height,
                ));
            })
        };

        let on_touch = {
            let canvas = canvas.clone();
            Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas.get_bounding_client_rect();
                    on_move(to_field_y(
                        touch.client_y() as f64,
                        rect.top(),
                        rect.height(),
                        field_height,
                    ));
                }
            })
        };

        canvas.add_event_listener_with_callback("mousemove", on_mouse.as_ref().unchecked_ref())?;

        // Non-passive so preventDefault can stop the page from scrolling
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_touch.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            canvas: canvas.clone(),
            on_mouse,
            on_touch,
        })
    }
}

impl Drop for PointerInput {
    fn drop(&mut self) {
        let _ = self
            .canvas
            .remove_event_listener_with_callback("mousemove", self.on_mouse.as_ref().unchecked_ref());
        let _ = self
            .canvas
            .remove_event_listener_with_callback("touchmove", self.on_touch.as_ref().unchecked_ref());
    }
}
