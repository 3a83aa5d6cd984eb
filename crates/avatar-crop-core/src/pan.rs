//! Pointer drag tracking for panning the image under the crop box.
//!
//! The tracker is a two-state machine:
//!
//! ```text
//! Idle --(primary press in Pan mode)--> Dragging --(release anywhere)--> Idle
//! ```
//!
//! While dragging, every move reports the delta since the previous pointer
//! position. Summing the deltas gives the pan offset, so coalesced or split
//! move events accumulate to the same result.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Translation applied to the displayed image, independent of the crop box.
pub type PanOffset = Point;

/// Which handler receives pointer input on the image.
///
/// The two modes are mutually exclusive: in `Crop` the crop box editor owns
/// the pointer and the box can be moved and resized; in `Pan` the crop box is
/// locked and drags translate the image instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Crop,
    Pan,
}

/// Mouse button of a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: u16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// Drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragTracker {
    #[default]
    Idle,
    Dragging {
        /// Last pointer position seen during this session.
        last: Point,
    },
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragTracker::Dragging { .. })
    }

    /// Handle a press on the image. Returns `true` if a drag session started.
    ///
    /// Only primary-button presses in [`InteractionMode::Pan`] start a
    /// session; anything else leaves the state untouched.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        position: Point,
        mode: InteractionMode,
    ) -> bool {
        if button != PointerButton::Primary || mode != InteractionMode::Pan {
            return false;
        }

        *self = DragTracker::Dragging { last: position };
        true
    }

    /// Handle a move anywhere on screen.
    ///
    /// Returns the delta since the previous position while dragging, or
    /// `None` when idle.
    pub fn pointer_move(&mut self, position: Point) -> Option<Point> {
        match self {
            DragTracker::Idle => None,
            DragTracker::Dragging { last } => {
                let delta = position - *last;
                *last = position;
                Some(delta)
            }
        }
    }

    /// Handle a release anywhere on screen. Returns `true` if a session ended.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        *self = DragTracker::Idle;
        was_dragging
    }

    /// Drop any active session without a release event.
    pub fn cancel(&mut self) {
        *self = DragTracker::Idle;
    }
}
