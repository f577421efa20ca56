// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: movement deltas between routed events and the offset of a held press.
//!
//! ## Usage
//!
//! 1) Call [`PointerTrack::press`] when a button goes down.
//! 2) Call [`PointerTrack::advance`] on every event to get the delta since the previous one.
//! 3) Read [`PointerTrack::drag_offset`] while the button is held.
//! 4) Call [`PointerTrack::release`] when the button goes up.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use cellgrid_router::pointer::PointerTrack;
//!
//! let mut track = PointerTrack::default();
//! assert_eq!(track.advance(Point::new(10.0, 20.0)), Vec2::ZERO);
//! track.press(Point::new(10.0, 20.0));
//!
//! assert_eq!(track.advance(Point::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
//! assert_eq!(track.drag_offset(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//!
//! track.release();
//! assert!(!track.is_pressed());
//! ```

use kurbo::{Point, Vec2};

/// Tracks the last pointer position and the position of the current press.
#[derive(Debug, Clone, Default, Copy)]
pub struct PointerTrack {
    /// Where the held button went down.
    pub press_pos: Option<Point>,
    /// Position of the last routed event.
    pub last_pos: Option<Point>,
}

impl PointerTrack {
    /// Record a press at `pos`.
    pub fn press(&mut self, pos: Point) {
        self.press_pos = Some(pos);
    }

    /// Move to `pos`, returning the delta from the previous position (zero for the first).
    pub fn advance(&mut self, pos: Point) -> Vec2 {
        let delta = self.last_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset of `pos` from the press position, while a button is held.
    pub fn drag_offset(&self, pos: Point) -> Option<Vec2> {
        self.press_pos.map(|start| pos - start)
    }

    /// Forget the press. The last position is kept for the next delta.
    pub fn release(&mut self) {
        self.press_pos = None;
    }

    /// Returns `true` while a press is held.
    pub fn is_pressed(&self) -> bool {
        self.press_pos.is_some()
    }
}
