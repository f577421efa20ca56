// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buttons: geometry, hit testing, and face swapping wired to the router.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use cellgrid_index::Aabb;
use cellgrid_router::{Bounded, PointerInput, PointerTarget};
use kurbo::{Point, Size};

use crate::behavior::{ButtonEvent, ButtonKind, ButtonState, Face};

/// A push or toggle button.
///
/// The button only tracks state: which [`Face`] to show and which [`ButtonEvent`]s happened.
/// Register it with an [`EventRouter`](cellgrid_router::EventRouter) and drain its events with
/// [`take_events`](Self::take_events) after routing.
///
/// ```
/// use std::rc::Rc;
/// use cellgrid_router::{EventClass, EventRouter};
/// use cellgrid_widgets::{Button, ButtonEvent, Face};
/// use kurbo::{Point, Size};
///
/// let mut router = EventRouter::default();
/// let ok = Rc::new(Button::push(Point::new(10.0, 10.0), Size::new(80.0, 24.0)));
/// router.register(&ok).unwrap();
///
/// router.route(EventClass::Press, Point::new(20.0, 20.0), &());
/// assert_eq!(ok.face(), Face::Pressed);
/// router.route(EventClass::Release, Point::new(500.0, 500.0), &());
/// assert_eq!(ok.take_events(), [ButtonEvent::Pressed, ButtonEvent::Released]);
/// ```
#[derive(Debug)]
pub struct Button {
    kind: ButtonKind,
    origin: Cell<Point>,
    size: Size,
    hover_face: bool,
    state: Cell<ButtonState>,
    events: RefCell<Vec<ButtonEvent>>,
}

impl Button {
    /// Create a button of `kind` with its bottom-left corner at `origin`.
    pub fn new(kind: ButtonKind, origin: Point, size: Size) -> Self {
        Self {
            kind,
            origin: Cell::new(origin),
            size,
            hover_face: false,
            state: Cell::new(ButtonState::default()),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Create a push button.
    pub fn push(origin: Point, size: Size) -> Self {
        Self::new(ButtonKind::Push, origin, size)
    }

    /// Create a toggle button.
    pub fn toggle(origin: Point, size: Size) -> Self {
        Self::new(ButtonKind::Toggle, origin, size)
    }

    /// Give the button a hover face.
    #[must_use]
    pub fn with_hover_face(mut self) -> Self {
        self.hover_face = true;
        self
    }

    /// Press/release strategy.
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    /// Face to draw.
    pub fn face(&self) -> Face {
        self.state.get().face
    }

    /// Held (push) or latched (toggle).
    pub fn is_pressed(&self) -> bool {
        self.state.get().pressed
    }

    /// Bottom-left corner.
    pub fn origin(&self) -> Point {
        self.origin.get()
    }

    /// Move the button. Call [`EventRouter::relocate`](cellgrid_router::EventRouter::relocate)
    /// afterwards so routing sees the new box.
    pub fn set_origin(&self, origin: Point) {
        self.origin.set(origin);
    }

    /// Returns `true` if `pos` is strictly inside the button.
    pub fn hit(&self, pos: Point) -> bool {
        self.aabb().contains_point(pos.x, pos.y)
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&self) -> Vec<ButtonEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    fn apply(&self, f: impl FnOnce(&mut ButtonState) -> Option<ButtonEvent>) {
        let mut state = self.state.get();
        let event = f(&mut state);
        self.state.set(state);
        if let Some(event) = event {
            self.events.borrow_mut().push(event);
        }
    }
}

impl Bounded for Button {
    fn aabb(&self) -> Aabb {
        let o = self.origin.get();
        Aabb::from_xywh(o.x, o.y, self.size.width, self.size.height)
    }
}

impl<P> PointerTarget<P> for Button {
    type Error = Infallible;

    fn on_press(&self, input: &PointerInput<'_, P>) -> Result<(), Infallible> {
        let hit = self.hit(input.position);
        self.apply(|s| self.kind.press(s, hit));
        Ok(())
    }

    fn on_release(&self, _: &PointerInput<'_, P>) -> Result<(), Infallible> {
        self.apply(|s| self.kind.release(s));
        Ok(())
    }

    fn on_motion(&self, input: &PointerInput<'_, P>) -> Result<(), Infallible> {
        let hit = self.hit(input.position);
        self.apply(|s| {
            self.kind.hover(s, hit, self.hover_face);
            None
        });
        Ok(())
    }

    fn on_leave(&self, _: &PointerInput<'_, P>) -> Result<(), Infallible> {
        self.apply(|s| {
            self.kind.hover(s, false, self.hover_face);
            None
        });
        Ok(())
    }
}
