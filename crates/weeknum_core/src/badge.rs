//! Click-vs-drag gesture tracking and screen clamping for the floating badge.

use emath::{Pos2, Rect, Vec2};

/// Manhattan distance (px) the pointer must travel before a press becomes a
/// drag. Under this, release is a click.
const DRAG_THRESHOLD: f32 = 6.0;

/// Distance from the screen edges for the default badge position.
const DEFAULT_MARGIN: f32 = 14.0;

/// What a completed press turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeGesture {
    /// Short press: toggle the popup, never persist the position.
    Click,
    /// The badge moved: persist the position, never toggle.
    Drag,
}

/// Tracks one press on the badge from press to release.
///
/// Movement only starts once the pointer has travelled the drag threshold
/// from the press point; after that the press is a drag for good, even if the
/// pointer wanders back.
#[derive(Clone, Copy, Debug)]
pub struct DragTracker {
    press_pointer: Pos2,
    /// Pointer position relative to the window origin at press time.
    grab_offset: Vec2,
    dragging: bool,
}

impl DragTracker {
    /// Starts tracking. Both positions are in screen coordinates.
    pub fn press(pointer: Pos2, window_origin: Pos2) -> Self {
        Self {
            press_pointer: pointer,
            grab_offset: pointer - window_origin,
            dragging: false,
        }
    }

    /// Feeds a pointer move. Returns the new window origin once the press has
    /// become a drag, `None` while it is still a candidate click. The caller
    /// clamps the result to the screen.
    pub fn pointer_moved(&mut self, pointer: Pos2) -> Option<Pos2> {
        if !self.dragging {
            let delta = pointer - self.press_pointer;
            if delta.x.abs() + delta.y.abs() >= DRAG_THRESHOLD {
                self.dragging = true;
            }
        }
        self.dragging.then(|| pointer - self.grab_offset)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Ends the press.
    pub fn release(self) -> BadgeGesture {
        if self.dragging {
            BadgeGesture::Drag
        } else {
            BadgeGesture::Click
        }
    }
}

// ----------------------------------------------------------------------------

/// Clamps a window origin so a `size` window stays inside `screen`. Windows
/// larger than the screen pin to the top-left edge.
pub fn clamp_to_screen(origin: Pos2, size: Vec2, screen: Rect) -> Pos2 {
    Pos2 {
        x: origin.x.min(screen.max.x - size.x).max(screen.min.x),
        y: origin.y.min(screen.max.y - size.y).max(screen.min.y),
    }
}

/// First-run badge position: bottom-right corner with a small margin.
pub fn default_badge_origin(size: Vec2, screen: Rect) -> Pos2 {
    let origin = Pos2 {
        x: screen.max.x - size.x - DEFAULT_MARGIN,
        y: screen.max.y - size.y - DEFAULT_MARGIN,
    };
    clamp_to_screen(origin, size, screen)
}

// ----------------------------------------------------------------------------
