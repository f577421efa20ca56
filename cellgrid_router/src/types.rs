// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event classes, interest masks, and the capabilities entries implement.

use cellgrid_index::{Aabb, EntryId};
use kurbo::{Point, Vec2};

/// Kind of pointer event.
///
/// The class decides how targets are chosen:
///
/// | Class | Targets | Engaged set |
/// |---|---|---|
/// | [`Press`](Self::Press) | entries under the pointer | receivers are added |
/// | [`Motion`](Self::Motion), [`Scroll`](Self::Scroll) | entries under the pointer | unchanged |
/// | [`Drag`](Self::Drag), [`Release`](Self::Release) | engaged entries | `Release` clears it |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// The pointer moved while a button was held.
    Drag,
    /// The pointer moved with no button held.
    Motion,
    /// A wheel or trackpad scroll.
    Scroll,
}

impl EventClass {
    /// All classes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Press,
        Self::Release,
        Self::Drag,
        Self::Motion,
        Self::Scroll,
    ];

    /// Returns `true` for classes routed by position rather than by capture.
    pub const fn is_positional(self) -> bool {
        matches!(self, Self::Press | Self::Motion | Self::Scroll)
    }

    /// Interest bit matching this class.
    pub const fn interest(self) -> Interest {
        match self {
            Self::Press => Interest::PRESS,
            Self::Release => Interest::RELEASE,
            Self::Drag => Interest::DRAG,
            Self::Motion => Interest::MOTION,
            Self::Scroll => Interest::SCROLL,
        }
    }
}

bitflags::bitflags! {
    /// Which notifications an entry wants.
    ///
    /// The router keeps one mask per registered entry and skips entries whose mask does not
    /// include the event's class. An entry that is not interested in [`PRESS`](Self::PRESS)
    /// can never become engaged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Interest: u8 {
        /// [`EventClass::Press`].
        const PRESS   = 0b0000_0001;
        /// [`EventClass::Release`].
        const RELEASE = 0b0000_0010;
        /// [`EventClass::Drag`].
        const DRAG    = 0b0000_0100;
        /// [`EventClass::Motion`].
        const MOTION  = 0b0000_1000;
        /// [`EventClass::Scroll`].
        const SCROLL  = 0b0001_0000;
        /// Pointer left the entry after a motion event.
        const LEAVE   = 0b0010_0000;
    }
}

impl Default for Interest {
    fn default() -> Self {
        Self::all()
    }
}

/// What a receiver was notified of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// A routed event.
    Event(EventClass),
    /// The pointer moved off an entry that the previous motion event hovered.
    Leave,
}

/// Anything with a box that can be registered with a router.
pub trait Bounded {
    /// Current bounding box, `(left, bottom, right, top)`.
    fn aabb(&self) -> Aabb;
}

/// Pointer state handed to every receiver.
#[derive(Debug)]
pub struct PointerInput<'a, P> {
    /// Class of the routed event.
    pub class: EventClass,
    /// Pointer position.
    pub position: Point,
    /// Movement since the previous routed event; zero for the first.
    pub delta: Vec2,
    /// Offset from the press position while a button is held.
    pub drag_offset: Option<Vec2>,
    /// Caller payload, forwarded untouched.
    pub payload: &'a P,
}

/// Pointer handlers an entry can implement.
///
/// Every handler defaults to doing nothing. Handlers take `&self` because entries are shared;
/// use interior mutability for state. A returned error is collected by the router and does
/// not stop delivery to other receivers.
pub trait PointerTarget<P> {
    /// Error a handler can report.
    type Error;

    /// Called for [`EventClass::Press`].
    fn on_press(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    /// Called for [`EventClass::Release`].
    fn on_release(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    /// Called for [`EventClass::Drag`].
    fn on_drag(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    /// Called for [`EventClass::Motion`].
    fn on_motion(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    /// Called for [`EventClass::Scroll`].
    fn on_scroll(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }

    /// Called after a motion event for entries the pointer has moved off.
    fn on_leave(&self, input: &PointerInput<'_, P>) -> Result<(), Self::Error> {
        let _ = input;
        Ok(())
    }
}

/// A handler error, tagged with where it happened.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchFailure<E> {
    /// Receiver that failed.
    pub entry: EntryId,
    /// Notification it was handling.
    pub delivery: Delivery,
    /// The handler's error.
    pub error: E,
}
