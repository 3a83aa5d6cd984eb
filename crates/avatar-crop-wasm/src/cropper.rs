//! Avatar cropper WASM bindings.
//!
//! [`JsAvatarCropper`] wraps the core session for the browser. Crop box
//! edits, mode toggles and the initial mousedown come in through method
//! calls; once a pan drag starts, window-level listeners feed moves and the
//! release straight into the session until the drag ends.
//!
//! ```typescript
//! const cropper = JsAvatarCropper.from_src(src, { exportFormat: 'png' });
//! img.onload = () => cropper.on_image_load(img.width, img.height);
//! img.onmousedown = (e) => cropper.pointer_down(e.button, e.clientX, e.clientY);
//! confirmButton.onclick = () => cropper.confirm((uri) => field.value = uri);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use avatar_crop_core::decode::DecodedImage;
use avatar_crop_core::{AvatarCropper, CropRegion, InteractionMode, Point, PointerButton, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

use crate::listeners::WindowPointerListeners;
use crate::types::{config_from_js, mode_name, JsCropRegion};

/// An avatar cropping session bound to one source image.
///
/// Window listeners only hold weak references to the session, so dropping
/// (or `free()`-ing) the cropper also detaches any drag still in progress.
#[wasm_bindgen]
pub struct JsAvatarCropper {
    state: Rc<RefCell<AvatarCropper>>,
    listeners: Rc<RefCell<Option<WindowPointerListeners>>>,
}

#[wasm_bindgen]
impl JsAvatarCropper {
    /// Create a cropper from an image source (usually a `data:` URI).
    ///
    /// Returns `undefined` for an empty source. `config` may be omitted;
    /// missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is malformed or the source cannot be
    /// decoded.
    pub fn from_src(src: &str, config: JsValue) -> Result<Option<JsAvatarCropper>, JsValue> {
        let config = config_from_js(config)?;
        let cropper =
            AvatarCropper::from_src(src, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(cropper.map(Self::from_core))
    }

    /// Create a cropper from an already loaded `<img>` element.
    ///
    /// The element's pixels are read at natural resolution through an
    /// offscreen canvas, and its rendered size becomes the displayed size.
    /// Returns `undefined` if the image has no pixels yet or a 2D context is
    /// unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is malformed or the canvas rejects the
    /// image (for example a cross-origin source taints it).
    pub fn from_element(
        img: &HtmlImageElement,
        config: JsValue,
    ) -> Result<Option<JsAvatarCropper>, JsValue> {
        let config = config_from_js(config)?;
        let Some(image) = read_element_pixels(img)? else {
            return Ok(None);
        };

        let mut cropper = AvatarCropper::new(image, config);
        cropper.on_image_load(Size::new(img.width() as f64, img.height() as f64));
        Ok(Some(Self::from_core(cropper)))
    }

    /// The image was laid out at `width` x `height` display pixels.
    ///
    /// Resets the crop to the centered square and zeroes the pan offset.
    pub fn on_image_load(&self, width: f64, height: f64) {
        self.state
            .borrow_mut()
            .on_image_load(Size::new(width, height));
        self.release_listeners();
    }

    /// Lay the image out in a container `container_width` pixels wide.
    pub fn on_image_load_in(&self, container_width: f64) {
        self.state.borrow_mut().on_image_load_in(container_width);
        self.release_listeners();
    }

    /// Restore the centered square crop and zero the pan offset. Ends any
    /// drag in progress.
    pub fn reset(&self) {
        self.state.borrow_mut().reset();
        self.release_listeners();
    }

    /// Toggle pan mode. Leaving pan mode ends any drag.
    pub fn set_pan_mode(&self, pan: bool) {
        let mode = if pan {
            InteractionMode::Pan
        } else {
            InteractionMode::Crop
        };
        self.state.borrow_mut().set_mode(mode);
        if !self.state.borrow().is_dragging() {
            self.release_listeners();
        }
    }

    /// `"crop"` or `"pan"`.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        mode_name(self.state.borrow().mode()).to_string()
    }

    /// Apply a crop box edit in display pixels. Returns `false` if the box
    /// is locked.
    pub fn update_crop(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.state
            .borrow_mut()
            .update_crop(CropRegion::pixels(x, y, width, height))
    }

    /// The current crop box, or `undefined` before the image has loaded.
    #[wasm_bindgen(getter)]
    pub fn crop(&self) -> Option<JsCropRegion> {
        self.state.borrow().crop().map(JsCropRegion::from_core)
    }

    #[wasm_bindgen(getter)]
    pub fn pan_x(&self) -> f64 {
        self.state.borrow().pan().x
    }

    #[wasm_bindgen(getter)]
    pub fn pan_y(&self) -> f64 {
        self.state.borrow().pan().y
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().is_dragging()
    }

    /// Whether the crop box should be drawn as a circle.
    #[wasm_bindgen(getter)]
    pub fn circular_crop(&self) -> bool {
        self.state.borrow().config().circular_crop
    }

    /// Whether rule-of-thirds guides should be drawn.
    #[wasm_bindgen(getter)]
    pub fn rule_of_thirds(&self) -> bool {
        self.state.borrow().config().rule_of_thirds
    }

    /// Mouse pressed on the image, in client coordinates.
    ///
    /// Starts a drag for a primary-button press in pan mode and begins
    /// tracking the pointer on the whole window. Returns whether a drag
    /// started.
    ///
    /// # Errors
    ///
    /// Returns an error if the window listeners cannot be registered; the
    /// drag is abandoned in that case.
    pub fn pointer_down(&self, button: u16, x: f64, y: f64) -> Result<bool, JsValue> {
        let started = self
            .state
            .borrow_mut()
            .pointer_down(PointerButton::from_dom(button), Point::new(x, y));
        if !started {
            return Ok(false);
        }

        if let Err(e) = self.attach_listeners() {
            self.state.borrow_mut().pointer_up();
            return Err(e);
        }
        Ok(true)
    }

    /// Render the crop as a data URI, or `undefined` if there is nothing to
    /// export yet.
    pub fn export(&self) -> Option<String> {
        self.state.borrow().export()
    }

    /// Export and pass the data URI to `on_complete`.
    ///
    /// Returns whether the callback ran. Nothing is called when the export is
    /// empty.
    ///
    /// # Errors
    ///
    /// Propagates an exception thrown by the callback.
    pub fn confirm(&self, on_complete: &js_sys::Function) -> Result<bool, JsValue> {
        let exported = self.state.borrow().export();
        match exported {
            Some(data_uri) => {
                on_complete.call1(&JsValue::NULL, &JsValue::from_str(&data_uri))?;
                Ok(true)
            }
            None => {
                web_sys::console::debug_1(&JsValue::from_str("avatar crop: nothing to export"));
                Ok(false)
            }
        }
    }
}

impl JsAvatarCropper {
    pub(crate) fn from_core(cropper: AvatarCropper) -> Self {
        Self {
            state: Rc::new(RefCell::new(cropper)),
            listeners: Rc::new(RefCell::new(None)),
        }
    }

    fn attach_listeners(&self) -> Result<(), JsValue> {
        let on_move_state = Rc::downgrade(&self.state);
        let on_up_state = Rc::downgrade(&self.state);
        let on_up_listeners = Rc::downgrade(&self.listeners);

        let guard = WindowPointerListeners::attach(
            move |event: MouseEvent| {
                if let Some(state) = on_move_state.upgrade() {
                    let position = Point::new(event.client_x() as f64, event.client_y() as f64);
                    state.borrow_mut().pointer_move(position);
                }
            },
            move |_event: MouseEvent| {
                if let Some(state) = on_up_state.upgrade() {
                    state.borrow_mut().pointer_up();
                }
                // Removing the listeners from inside one of them is fine:
                // the running closure is freed once it returns.
                if let Some(listeners) = on_up_listeners.upgrade() {
                    let guard = listeners.borrow_mut().take();
                    drop(guard);
                }
            },
        )?;

        // Replacing a stale guard detaches its listeners.
        let previous = self.listeners.borrow_mut().replace(guard);
        drop(previous);
        Ok(())
    }

    fn release_listeners(&self) {
        let guard = self.listeners.borrow_mut().take();
        drop(guard);
    }

    #[cfg(test)]
    fn has_listeners(&self) -> bool {
        self.listeners.borrow().is_some()
    }
}

/// Draw an `<img>` onto an offscreen canvas and read back its RGBA pixels.
fn read_element_pixels(img: &HtmlImageElement) -> Result<Option<DecodedImage>, JsValue> {
    let (width, height) = (img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let Some(context) = canvas.get_context("2d")? else {
        return Ok(None);
    };
    let context: CanvasRenderingContext2d = context.dyn_into()?;

    context.draw_image_with_html_image_element(img, 0.0, 0.0)?;
    let data = context.get_image_data(0.0, 0.0, width as f64, height as f64)?;

    Ok(Some(DecodedImage::new(width, height, data.data().0)))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use avatar_crop_core::decode::decode_source;
    use avatar_crop_core::encode::{encode_raster, to_data_uri, ExportFormat};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_src(width: u32, height: u32) -> String {
        let pixels = vec![90u8; (width * height * 4) as usize];
        let bytes = encode_raster(&pixels, width, height, ExportFormat::Png, 90).unwrap();
        to_data_uri(ExportFormat::Png.mime(), &bytes)
    }

    fn mouse(kind: &str, x: i32, y: i32) {
        let init = web_sys::MouseEventInit::new();
        init.set_client_x(x);
        init.set_client_y(y);
        let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_from_src_empty_is_none() {
        let result = JsAvatarCropper::from_src("", JsValue::UNDEFINED).unwrap();
        assert!(result.is_none());
    }

    #[wasm_bindgen_test]
    fn test_from_src_invalid_is_error() {
        let result = JsAvatarCropper::from_src("data:image/png;base64,AAAA", JsValue::UNDEFINED);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_drag_pans_through_window_events() {
        let c = JsAvatarCropper::from_src(&png_src(40, 20), JsValue::UNDEFINED)
            .unwrap()
            .unwrap();
        c.on_image_load(40.0, 20.0);
        c.set_pan_mode(true);

        assert!(c.pointer_down(0, 10.0, 10.0).unwrap());
        assert!(c.has_listeners());

        mouse("mousemove", 14, 7);
        mouse("mousemove", 16, 9);
        assert_eq!((c.pan_x(), c.pan_y()), (6.0, -1.0));

        mouse("mouseup", 16, 9);
        assert!(!c.is_dragging());
        assert!(!c.has_listeners());

        // Released: further moves are ignored
        mouse("mousemove", 30, 30);
        assert_eq!((c.pan_x(), c.pan_y()), (6.0, -1.0));
    }

    #[wasm_bindgen_test]
    fn test_leaving_pan_mode_detaches() {
        let c = JsAvatarCropper::from_src(&png_src(40, 20), JsValue::UNDEFINED)
            .unwrap()
            .unwrap();
        c.on_image_load(40.0, 20.0);
        c.set_pan_mode(true);
        assert!(c.pointer_down(0, 0.0, 0.0).unwrap());

        c.set_pan_mode(false);
        assert!(!c.is_dragging());
        assert!(!c.has_listeners());
    }

    fn dragging_cropper() -> JsAvatarCropper {
        let c = JsAvatarCropper::from_src(&png_src(40, 20), JsValue::UNDEFINED)
            .unwrap()
            .unwrap();
        c.on_image_load(40.0, 20.0);
        c.set_pan_mode(true);
        assert!(c.pointer_down(0, 10.0, 10.0).unwrap());
        assert!(c.has_listeners());
        c
    }

    #[wasm_bindgen_test]
    fn test_drop_mid_drag_detaches() {
        let c = dragging_cropper();
        let state = Rc::downgrade(&c.state);
        let listeners = Rc::downgrade(&c.listeners);

        drop(c);
        // The guard went with the cropper, so its Drop removed both handlers
        assert!(listeners.upgrade().is_none());
        assert!(state.upgrade().is_none());

        mouse("mousemove", 30, 30);
        mouse("mouseup", 30, 30);
    }

    #[wasm_bindgen_test]
    fn test_reload_mid_drag_detaches() {
        let c = dragging_cropper();
        mouse("mousemove", 15, 12);
        assert_eq!((c.pan_x(), c.pan_y()), (5.0, 2.0));

        c.on_image_load(40.0, 20.0);
        assert!(!c.is_dragging());
        assert!(!c.has_listeners());

        mouse("mousemove", 30, 30);
        assert_eq!((c.pan_x(), c.pan_y()), (0.0, 0.0));
    }

    #[wasm_bindgen_test]
    fn test_reset_mid_drag_detaches() {
        let c = dragging_cropper();
        mouse("mousemove", 14, 14);

        c.reset();
        assert!(!c.is_dragging());
        assert!(!c.has_listeners());

        mouse("mousemove", 30, 30);
        assert_eq!((c.pan_x(), c.pan_y()), (0.0, 0.0));
    }

    #[wasm_bindgen_test]
    fn test_confirm_passes_data_uri() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"exportFormat".into(), &"png".into()).unwrap();
        let c = JsAvatarCropper::from_src(&png_src(40, 20), config.into())
            .unwrap()
            .unwrap();
        c.on_image_load(40.0, 20.0);

        let uri = Rc::new(RefCell::new(String::new()));
        let sink = uri.clone();
        let callback = Closure::<dyn FnMut(String)>::new(move |value: String| {
            *sink.borrow_mut() = value;
        });

        assert!(c.confirm(callback.as_ref().unchecked_ref()).unwrap());
        let exported = decode_source(&uri.borrow()).unwrap();
        assert_eq!((exported.width, exported.height), (20, 20));
    }

    #[wasm_bindgen_test]
    fn test_confirm_without_load_skips_callback() {
        let c = JsAvatarCropper::from_src(&png_src(8, 8), JsValue::UNDEFINED)
            .unwrap()
            .unwrap();
        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();
        let callback = Closure::<dyn FnMut(String)>::new(move |_: String| {
            *flag.borrow_mut() = true;
        });

        assert!(!c.confirm(callback.as_ref().unchecked_ref()).unwrap());
        assert!(!*called.borrow());
    }
}
