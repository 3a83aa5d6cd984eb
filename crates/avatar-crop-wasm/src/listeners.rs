//! Window-level pointer listeners scoped to a drag session.
//!
//! Once a drag starts, moves and releases must be seen anywhere on the page,
//! not only over the image. [`WindowPointerListeners`] registers a
//! `mousemove`/`mouseup` pair on `window` and removes both when dropped, so
//! whichever path ends the session (release, mode switch, reload, teardown)
//! also releases the handlers.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

type PointerHandler = Closure<dyn FnMut(MouseEvent)>;

pub(crate) struct WindowPointerListeners {
    window: Window,
    on_move: PointerHandler,
    on_up: PointerHandler,
}

impl WindowPointerListeners {
    /// Register both handlers on the global window.
    ///
    /// # Errors
    ///
    /// Fails if there is no global window or the browser rejects a
    /// registration. Nothing stays registered on failure.
    pub(crate) fn attach<M, U>(on_move: M, on_up: U) -> Result<Self, JsValue>
    where
        M: FnMut(MouseEvent) + 'static,
        U: FnMut(MouseEvent) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No global window"))?;

        let on_move: PointerHandler = Closure::new(on_move);
        let on_up: PointerHandler = Closure::new(on_up);

        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        if let Err(e) =
            window.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())
        {
            let _ = window
                .remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
            return Err(e);
        }

        Ok(Self {
            window,
            on_move,
            on_up,
        })
    }
}

impl Drop for WindowPointerListeners {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
    }
}
