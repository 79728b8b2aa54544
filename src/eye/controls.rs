// Eye interaction state: visibility and window dragging

use crate::geometry::{Offset, Point};

/// Whether the eye window is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Left-button drag of the whole window
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    /// Cursor position relative to the window origin at press time
    grab: Option<Offset>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Both points in screen coordinates
    pub fn press(&mut self, cursor: Point, window_origin: Point) {
        self.grab = Some(cursor - window_origin);
    }

    /// New window origin for this cursor position, if a drag is in progress
    /// and the left button is still held.
    pub fn drag_to(&self, cursor: Point, left_held: bool) -> Option<Point> {
        match self.grab {
            Some(grab) if left_held => Some(cursor - grab),
            _ => None,
        }
    }

    pub fn release(&mut self) {
        self.grab = None;
    }
}
