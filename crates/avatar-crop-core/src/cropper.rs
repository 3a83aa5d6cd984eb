//! The avatar cropper session.
//!
//! [`AvatarCropper`] holds everything the widget knows between events: the
//! decoded source, the current layout, the crop box, the pan offset, the
//! interaction mode and the drag session. The host feeds it UI events and
//! calls [`AvatarCropper::confirm`] when the user accepts the crop.
//!
//! # Lifecycle
//!
//! 1. Construct from a source ([`AvatarCropper::from_src`]).
//! 2. [`AvatarCropper::on_image_load`] once the image is laid out; this
//!    creates the centered square crop and zeroes the pan offset.
//! 3. Mode toggles, crop edits and drags mutate the state.
//! 4. [`AvatarCropper::confirm`] exports and hands the data URI back.
//!
//! Dropping the cropper discards all of it.

use crate::config::CropperConfig;
use crate::decode::{decode_source, DecodeError, DecodedImage};
use crate::export::export_data_uri;
use crate::geometry::{centered_square_crop, fit_within, CropRegion, Point, Size};
use crate::pan::{DragTracker, InteractionMode, PanOffset, PointerButton};

#[derive(Debug, Clone)]
pub struct AvatarCropper {
    image: DecodedImage,
    config: CropperConfig,
    displayed: Option<Size>,
    crop: Option<CropRegion>,
    pan: PanOffset,
    mode: InteractionMode,
    drag: DragTracker,
}

impl AvatarCropper {
    /// Create a cropper over an already decoded image.
    ///
    /// Nothing is laid out yet: there is no crop box until
    /// [`on_image_load`](Self::on_image_load) runs.
    pub fn new(image: DecodedImage, config: CropperConfig) -> Self {
        Self {
            image,
            config,
            displayed: None,
            crop: None,
            pan: PanOffset::ORIGIN,
            mode: InteractionMode::default(),
            drag: DragTracker::default(),
        }
    }

    /// Create a cropper from an image source string.
    ///
    /// An empty source means there is nothing to crop and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError`] from decoding a non-empty source.
    pub fn from_src(src: &str, config: CropperConfig) -> Result<Option<Self>, DecodeError> {
        if src.is_empty() {
            return Ok(None);
        }

        let image = decode_source(src)?;
        tracing::debug!(width = image.width, height = image.height, "decoded avatar source");
        Ok(Some(Self::new(image, config)))
    }

    /// The image finished loading and was rendered at `displayed` size.
    ///
    /// Replaces the crop with the centered square, zeroes the pan offset and
    /// ends any drag in progress.
    pub fn on_image_load(&mut self, displayed: Size) {
        self.displayed = Some(displayed);
        self.crop = Some(centered_square_crop(displayed.width, displayed.height));
        self.pan = PanOffset::ORIGIN;
        self.drag.cancel();
        tracing::debug!(?displayed, crop = ?self.crop, "avatar image loaded");
    }

    /// Like [`on_image_load`](Self::on_image_load), laying the image out
    /// `object-contain` in a box `container_width` wide and at most
    /// `max_display_height` tall.
    pub fn on_image_load_in(&mut self, container_width: f64) {
        let displayed = fit_within(
            self.image.natural_size(),
            container_width,
            self.config.max_display_height,
        );
        self.on_image_load(displayed);
    }

    /// Restore the centered square crop, zero the pan offset and end any
    /// drag in progress.
    ///
    /// Before the image has loaded this produces a zero-sized crop.
    pub fn reset(&mut self) {
        let displayed = self.displayed.unwrap_or_default();
        self.crop = Some(centered_square_crop(displayed.width, displayed.height));
        self.pan = PanOffset::ORIGIN;
        self.drag.cancel();
        tracing::debug!(crop = ?self.crop, "avatar crop reset");
    }

    /// Switch between crop and pan interaction. Leaving pan mode ends any drag.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode != self.mode {
            self.drag.cancel();
            self.mode = mode;
        }
    }

    /// Apply a user edit of the crop box.
    ///
    /// The edit is aspect-locked to a square and kept inside the displayed
    /// image. Returns `false` without changing anything when the box is
    /// locked (pan mode) or the image has not loaded yet.
    pub fn update_crop(&mut self, region: CropRegion) -> bool {
        let Some(displayed) = self.displayed else {
            return false;
        };
        if self.mode != InteractionMode::Crop {
            return false;
        }

        self.crop = Some(region.constrain_square(displayed));
        true
    }

    /// Pointer pressed on the image. Returns `true` if a drag session started.
    pub fn pointer_down(&mut self, button: PointerButton, position: Point) -> bool {
        self.drag.pointer_down(button, position, self.mode)
    }

    /// Pointer moved anywhere. Returns `true` if the pan offset changed.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        match self.drag.pointer_move(position) {
            Some(delta) => {
                self.pan = self.pan + delta;
                true
            }
            None => false,
        }
    }

    /// Pointer released anywhere. Returns `true` if a drag session ended.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.pointer_up()
    }

    /// Render the current crop as a data URI, or `None` if there is nothing
    /// to export yet.
    pub fn export(&self) -> Option<String> {
        let crop = self.crop.as_ref()?;
        let displayed = self.displayed?;
        export_data_uri(&self.image, crop, self.pan, displayed, &self.config)
    }

    /// Export and pass the result to `on_complete`.
    ///
    /// The callback runs at most once and only when there is a result; an
    /// empty export is skipped silently. Returns whether it ran.
    pub fn confirm<F>(&self, on_complete: F) -> bool
    where
        F: FnOnce(String),
    {
        match self.export() {
            Some(data_uri) => {
                on_complete(data_uri);
                true
            }
            None => false,
        }
    }

    pub fn crop(&self) -> Option<CropRegion> {
        self.crop
    }

    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn displayed_size(&self) -> Option<Size> {
        self.displayed
    }

    pub fn natural_size(&self) -> Size {
        self.image.natural_size()
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }
}
